//! Login and registration payloads.

use serde::{Deserialize, Serialize};

use crate::RecordsError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub emp_id: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub token: Option<String>,
}

/// Role requested at registration. Creating an admin requires an admin token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    #[default]
    User,
    Admin,
}

impl Privilege {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub emp_id: String,
    pub full_name: String,
    pub password: String,
    pub privilege: Privilege,
}

/// # Errors
///
/// Returns [`RecordsError::Form`] when either field is blank.
pub fn validate_login(emp_id: &str, password: &str) -> Result<LoginRequest, RecordsError> {
    if emp_id.trim().is_empty() || password.is_empty() {
        return Err(RecordsError::Form("Employee ID and password are required."));
    }
    Ok(LoginRequest {
        emp_id: emp_id.trim().to_owned(),
        password: password.to_owned(),
    })
}

/// # Errors
///
/// Returns [`RecordsError::Form`] when a field is blank or the password
/// confirmation differs.
pub fn validate_signup(
    emp_id: &str,
    full_name: &str,
    password: &str,
    confirm: &str,
    privilege: Privilege,
) -> Result<RegisterRequest, RecordsError> {
    if [emp_id.trim(), full_name.trim(), password, confirm]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(RecordsError::Form("All fields are required."));
    }
    if password != confirm {
        return Err(RecordsError::Form("Passwords do not match."));
    }
    Ok(RegisterRequest {
        emp_id: emp_id.trim().to_owned(),
        full_name: full_name.trim().to_owned(),
        password: password.to_owned(),
        privilege,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    Failed(&'static str),
}

impl RegisterOutcome {
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            200 | 201 => Self::Registered,
            409 => Self::Failed("User Already Exists"),
            403 => Self::Failed("Admin Privilege Required"),
            _ => Self::Failed("Cannot Register"),
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
