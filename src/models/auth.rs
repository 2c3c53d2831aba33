//! Session and role models.

use remote_collection::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Member;

pub const MIN_PASSWORD_LEN: usize = 6;

/// User role as sent by the backend. Unknown roles are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Assistant,
    Member,
    ResearchCoord,
    DivisionHead,
    Treasurer,
    HeadLab,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Assistant => "ASSISTANT",
            Role::Member => "MEMBER",
            Role::ResearchCoord => "RESEARCH_COORD",
            Role::DivisionHead => "DIVISION_HEAD",
            Role::Treasurer => "TREASURER",
            Role::HeadLab => "HEAD_LAB",
            Role::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Admin => "Administrator",
            Role::Assistant => "Assistant",
            Role::Member => "Member",
            Role::ResearchCoord => "Research Coordinator",
            Role::DivisionHead => "Division Head",
            Role::Treasurer => "Treasurer",
            Role::HeadLab => "Head of Lab",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }

    /// Members screen and other admin-only menu entries
    pub fn can_manage_members(&self) -> bool {
        self.is_admin()
    }

    pub fn can_approve_projects(&self) -> bool {
        matches!(self, Role::Admin | Role::ResearchCoord | Role::DivisionHead)
    }

    /// Record transactions, decide procurement, verify dues
    pub fn can_manage_finance(&self) -> bool {
        matches!(self, Role::Admin | Role::Treasurer | Role::HeadLab)
    }

    pub fn can_manage_periods(&self) -> bool {
        self.is_admin()
    }

    pub fn can_delete(&self) -> bool {
        self.is_admin()
    }

    pub fn can_archive(&self) -> bool {
        self.is_admin()
    }

    pub fn can_approve_letters(&self) -> bool {
        matches!(self, Role::Admin | Role::HeadLab)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ADMIN" => Role::Admin,
            "ASSISTANT" => Role::Assistant,
            "MEMBER" => Role::Member,
            "RESEARCH_COORD" => Role::ResearchCoord,
            "DIVISION_HEAD" => Role::DivisionHead,
            "TREASURER" => Role::Treasurer,
            "HEAD_LAB" => Role::HeadLab,
            _ => Role::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub is_password_changed: bool,
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `PUT /auth/profile` body. Name and username are not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: String,
    pub phone_number: String,
    pub social_media_link: String,
    pub expert_division: String,
    pub department: String,
}

impl UpdateProfileRequest {
    /// Form prefilled from the member record
    pub fn from_member(member: &Member) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            email: text(&member.email),
            phone_number: text(&member.phone_number),
            social_media_link: text(&member.social_media_link),
            expert_division: text(&member.expert_division),
            department: text(&member.department),
        }
    }

    /// Trim every field; empty fields are sent as empty strings
    pub fn normalized(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            social_media_link: self.social_media_link.trim().to_string(),
            expert_division: self.expert_division.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err(ApiError::Validation("Email address is not valid".into()));
        }
        let link = self.social_media_link.trim();
        if !link.is_empty() && !(link.starts_with("http://") || link.starts_with("https://")) {
            return Err(ApiError::Validation("Social media link must start with http:// or https://".into()));
        }
        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// `PUT /auth/change-password` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    /// Check the confirmation and length before building the body
    pub fn new(current: &str, new: &str, confirm: &str) -> ApiResult<Self> {
        if current.is_empty() || new.is_empty() {
            return Err(ApiError::Validation("Current and new password are required".into()));
        }
        if new != confirm {
            return Err(ApiError::Validation("New passwords do not match".into()));
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!("Password must be at least {} characters", MIN_PASSWORD_LEN)));
        }
        Ok(Self { current_password: current.to_string(), new_password: new.to_string() })
    }
}

/// `POST /auth/login` response; held in memory only
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_round_trip_keeps_unknown() {
        let role: Role = serde_json::from_value(json!("LAB_GUEST")).unwrap();
        assert_eq!(role, Role::Other("LAB_GUEST".into()));
        assert_eq!(serde_json::to_value(&role).unwrap(), json!("LAB_GUEST"));
        assert_eq!(serde_json::from_value::<Role>(json!("HEAD_LAB")).unwrap(), Role::HeadLab);
    }

    #[test]
    fn test_role_gates() {
        assert!(Role::Admin.can_manage_members());
        assert!(!Role::Treasurer.can_manage_members());

        assert!(Role::DivisionHead.can_approve_projects());
        assert!(Role::ResearchCoord.can_approve_projects());
        assert!(!Role::Member.can_approve_projects());

        assert!(Role::Treasurer.can_manage_finance());
        assert!(Role::HeadLab.can_manage_finance());
        assert!(!Role::Assistant.can_manage_finance());

        assert!(!Role::HeadLab.can_delete());
        assert!(!Role::Other("ADMIN ".into()).is_admin());
    }

    #[test]
    fn test_change_password_checks_confirmation_then_length() {
        let mismatch = ChangePasswordRequest::new("old", "secret1", "secret2");
        assert!(matches!(mismatch, Err(ApiError::Validation(m)) if m.contains("match")));

        let short = ChangePasswordRequest::new("old", "abc", "abc");
        assert!(matches!(short, Err(ApiError::Validation(m)) if m.contains("6")));

        assert!(ChangePasswordRequest::new("", "secret1", "secret1").is_err());

        let ok = ChangePasswordRequest::new("old", "secret", "secret").unwrap();
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"currentPassword": "old", "newPassword": "secret"})
        );
    }

    #[test]
    fn test_profile_form_from_member() {
        let member: Member = serde_json::from_value(json!({
            "id": "m1", "username": "2201001", "fullName": "Rina Putri",
            "email": "rina@lab.ac.id", "expertDivision": "GIS", "socialMediaLink": "https://linkedin.com/in/rina"
        }))
        .unwrap();
        let form = UpdateProfileRequest::from_member(&member);
        assert_eq!(form.email, "rina@lab.ac.id");
        assert_eq!(form.phone_number, "");
        assert!(form.validate().is_ok());

        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["expertDivision"], "GIS");
        assert_eq!(body["socialMediaLink"], "https://linkedin.com/in/rina");
    }

    #[test]
    fn test_profile_validation() {
        assert!(UpdateProfileRequest::default().validate().is_ok());

        let bad_email = UpdateProfileRequest { email: "rina.lab.ac.id".into(), ..Default::default() };
        assert!(bad_email.validate().is_err());
        let bad_domain = UpdateProfileRequest { email: "rina@lab".into(), ..Default::default() };
        assert!(bad_domain.validate().is_err());

        let bad_link = UpdateProfileRequest { social_media_link: "linkedin.com/in/rina".into(), ..Default::default() };
        assert!(bad_link.validate().is_err());

        let padded = UpdateProfileRequest { email: "  rina@lab.ac.id ".into(), ..Default::default() };
        assert!(padded.validate().is_ok());
        assert_eq!(padded.normalized().email, "rina@lab.ac.id");
    }

    #[test]
    fn test_session_decodes() {
        let session: Session = serde_json::from_value(json!({
            "token": "jwt",
            "user": {"id": "u1", "username": "2201001", "fullName": "Rina Putri", "role": "TREASURER"}
        }))
        .unwrap();
        assert_eq!(session.user.role, Role::Treasurer);
        assert_eq!(session.user.display_name(), "Rina Putri");
        assert!(!session.user.is_password_changed);
    }
}
