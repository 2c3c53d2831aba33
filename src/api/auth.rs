//! Auth Endpoints

use remote_collection::{ApiClient, ApiError, ApiResult, Method};

use super::HttpClient;
use crate::models::{ChangePasswordRequest, LoginRequest, Session, UpdateProfileRequest};

const LOGIN: &str = "/auth/login";
const PROFILE: &str = "/auth/profile";
const CHANGE_PASSWORD: &str = "/auth/change-password";

/// Exchange credentials for a session
pub async fn login(client: &HttpClient, username: &str, password: &str) -> ApiResult<Session> {
    let request = login_request(username, password)?;
    let body = serde_json::to_value(&request)?;
    let response = client
        .request(Method::Post, LOGIN, Some(&body))
        .await?
        .ok_or_else(|| ApiError::Decode("empty login response".into()))?;
    Ok(serde_json::from_value(response)?)
}

/// Save the editable profile fields of the signed-in user
pub async fn update_profile(client: &HttpClient, form: &UpdateProfileRequest) -> ApiResult<()> {
    let body = profile_body(form)?;
    client.request(Method::Put, PROFILE, Some(&body)).await?;
    Ok(())
}

/// The server invalidates the session on success
pub async fn change_password(client: &HttpClient, current: &str, new: &str, confirm: &str) -> ApiResult<()> {
    let request = ChangePasswordRequest::new(current, new, confirm)?;
    let body = serde_json::to_value(&request)?;
    client.request(Method::Put, CHANGE_PASSWORD, Some(&body)).await?;
    Ok(())
}

fn profile_body(form: &UpdateProfileRequest) -> ApiResult<serde_json::Value> {
    form.validate()?;
    Ok(serde_json::to_value(form.normalized())?)
}

fn login_request(username: &str, password: &str) -> ApiResult<LoginRequest> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Username and password are required".into()));
    }
    Ok(LoginRequest { username: username.to_string(), password: password.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_both_fields() {
        assert!(login_request(" ", "secret").is_err());
        assert!(login_request("2201001", "").is_err());
        assert_eq!(login_request(" 2201001 ", "secret").unwrap().username, "2201001");
    }

    #[test]
    fn test_profile_body_is_trimmed_and_validated() {
        let form = UpdateProfileRequest {
            email: " rina@lab.ac.id ".into(),
            phone_number: "0812 ".into(),
            ..Default::default()
        };
        let body = profile_body(&form).unwrap();
        assert_eq!(body["email"], "rina@lab.ac.id");
        assert_eq!(body["phoneNumber"], "0812");
        assert_eq!(body["department"], "");

        let bad = UpdateProfileRequest { email: "nope".into(), ..Default::default() };
        assert!(matches!(profile_body(&bad), Err(ApiError::Validation(_))));
    }
}
