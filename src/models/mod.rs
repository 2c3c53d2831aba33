//! Frontend Models
//!
//! Data structures matching backend entities.

mod activity;
mod archive;
mod auth;
mod dashboard;
mod event;
mod finance;
mod letter;
mod member;
mod period;
mod project;

pub use activity::*;
pub use archive::*;
pub use auth::*;
pub use dashboard::*;
pub use event::*;
pub use finance::*;
pub use letter::*;
pub use member::*;
pub use period::*;
pub use project::*;

use serde::{Deserialize, Serialize};

/// `(value, label)` pairs for select inputs
pub type Choices = &'static [(&'static str, &'static str)];

/// Compact member reference embedded in projects and events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub expert_division: Option<String>,
}

/// Label for `value` in `choices`, or the value itself
pub fn choice_label(choices: Choices, value: &str) -> String {
    choices
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.replace('_', " "))
}

/// `2024-03-01T08:00:00` → `2024-03-01`
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Thousands-separated rupiah amount
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let whole = amount.abs().round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}Rp {}", if negative { "-" } else { "" }, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "Rp 0");
        assert_eq!(format_currency(1500000.0), "Rp 1.500.000");
        assert_eq!(format_currency(-25000.4), "-Rp 25.000");
    }

    #[test]
    fn test_choice_label_falls_back_to_value() {
        const CHOICES: Choices = &[("BIG_DATA", "Big Data")];
        assert_eq!(choice_label(CHOICES, "BIG_DATA"), "Big Data");
        assert_eq!(choice_label(CHOICES, "ON_HOLD"), "ON HOLD");
    }

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2024-03-01T08:00:00"), "2024-03-01");
        assert_eq!(date_part("2024-03-01"), "2024-03-01");
    }
}
