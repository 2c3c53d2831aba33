use remote_collection::{parse_timestamp, ApiError, ApiResult, Entity, Filterable};
use serde::{Deserialize, Serialize};

use super::Choices;

pub const TRANSACTION_TYPES: Choices = &[("INCOME", "Income"), ("EXPENSE", "Expense")];

pub const PRIORITIES: Choices = &[("LOW", "Low"), ("MEDIUM", "Medium"), ("HIGH", "High")];

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_VERIFIED: &str = "VERIFIED";

// ========================
// Transactions
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceTransaction {
    pub id: String,
    #[serde(default)]
    pub transaction_date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl FinanceTransaction {
    pub fn is_income(&self) -> bool {
        self.kind == "INCOME"
    }
}

impl Entity for FinanceTransaction {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for FinanceTransaction {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "description" => Some(&self.description),
            "categoryName" => self.category_name.as_deref(),
            "type" => Some(&self.kind),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.description
    }

    fn sort_time(&self) -> Option<i64> {
        parse_timestamp(&self.transaction_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinanceCategory {
    pub id: String,
    pub name: String,
    /// INCOME, EXPENSE or BOTH
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl FinanceCategory {
    pub fn applies_to(&self, transaction_kind: &str) -> bool {
        self.kind == "BOTH" || self.kind == transaction_kind
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: String,
    pub transaction_date: String,
}

/// Description as stored: the text plus optional ` (PIC: name)` and
/// ` - Note: note` suffixes. Blank extras are left out, and a blank
/// description stays blank so validation still rejects it.
pub fn compose_description(description: &str, pic_name: Option<&str>, note: &str) -> String {
    let mut out = description.trim().to_string();
    if out.is_empty() {
        return out;
    }
    if let Some(pic) = pic_name.map(str::trim).filter(|p| !p.is_empty()) {
        out.push_str(&format!(" (PIC: {})", pic));
    }
    let note = note.trim();
    if !note.is_empty() {
        out.push_str(&format!(" - Note: {}", note));
    }
    out
}

impl CreateTransactionRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.description.trim().is_empty()
            || !(self.amount > 0.0)
            || self.category_id.is_empty()
            || self.transaction_date.is_empty()
        {
            return Err(ApiError::Validation(
                "Description, amount greater than zero, category and date are required".into(),
            ));
        }
        Ok(())
    }
}

// ========================
// Procurement
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementRequest {
    pub id: String,
    pub item_name: String,
    #[serde(default)]
    pub estimated_price: f64,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub requester_nim: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub purchase_link: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProcurementRequest {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }
}

impl Entity for ProcurementRequest {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for ProcurementRequest {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "itemName" => Some(&self.item_name),
            "requesterName" => self.requester_name.as_deref(),
            "status" => Some(&self.status),
            "priority" => Some(&self.priority),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.item_name
    }

    fn sort_time(&self) -> Option<i64> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcurementRequest {
    pub item_name: String,
    pub estimated_price: f64,
    pub priority: String,
    pub reason: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_link: Option<String>,
}

impl CreateProcurementRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.item_name.trim().is_empty() || !(self.estimated_price > 0.0) {
            return Err(ApiError::Validation("Item name and estimated price are required".into()));
        }
        Ok(())
    }
}

// ========================
// Dues
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesPayment {
    pub id: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub member_nim: Option<String>,
    #[serde(default)]
    pub payment_month: u32,
    #[serde(default)]
    pub payment_year: i32,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_proof_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub paid_at: Option<String>,
}

impl DuesPayment {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }

    pub fn period_label(&self) -> String {
        format!("{}/{}", self.payment_month, self.payment_year)
    }
}

impl Entity for DuesPayment {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for DuesPayment {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "memberName" => Some(&self.member_name),
            "memberNim" => self.member_nim.as_deref(),
            "status" => Some(&self.status),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.member_name
    }

    fn sort_time(&self) -> Option<i64> {
        self.paid_at.as_deref().and_then(parse_timestamp)
    }
}

/// JSON part of the dues multipart upload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDuesRequest {
    pub payment_month: u32,
    pub payment_year: i32,
    pub amount: f64,
}

impl CreateDuesRequest {
    /// Validate and render the `data` field. `has_file` is whether a proof
    /// file was picked.
    pub fn multipart_data(&self, has_file: bool) -> ApiResult<String> {
        if !(self.amount > 0.0) || !has_file {
            return Err(ApiError::Validation("Amount and payment proof are required".into()));
        }
        if !(1..=12).contains(&self.payment_month) {
            return Err(ApiError::Validation("Payment month must be between 1 and 12".into()));
        }
        Ok(serde_json::to_string(self)?)
    }
}
