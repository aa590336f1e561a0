use lazy_static::lazy_static;
use regex::Regex;

use super::dto::UserCreate;
use super::repo::UserRole;
use crate::errors::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// A user record ready for insertion: every column has a concrete value.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub date_of_birth: String,
    pub phone: String,
    pub country: String,
    pub region: String,
    pub district: String,
    pub publish_phone: bool,
    pub publish_status: bool,
    pub role: UserRole,
}

/// Checks the required registration fields and returns the normalized
/// email and the plain password.
pub fn validate_registration(req: &UserCreate) -> Result<(String, String), AppError> {
    let email = req
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("email is required".into()))?;

    if !is_valid_email(&email) {
        return Err(AppError::Validation("email is invalid".into()));
    }

    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("password is required".into()))?;

    if password.len() < 8 {
        return Err(AppError::Validation("password too short".into()));
    }

    Ok((email, password.to_string()))
}

/// Creation-only default substitution: absent text fields become empty,
/// absent flags false, absent role student. Updates never re-apply these.
pub fn fill_creation_defaults(req: UserCreate, email: String, password_hash: String) -> NewUser {
    NewUser {
        email,
        password_hash,
        first_name: req.first_name.unwrap_or_default(),
        last_name: req.last_name.unwrap_or_default(),
        avatar: req.avatar.unwrap_or_default(),
        date_of_birth: req.date_of_birth.unwrap_or_default(),
        phone: req.phone.unwrap_or_default(),
        country: req.country.unwrap_or_default(),
        region: req.region.unwrap_or_default(),
        district: req.district.unwrap_or_default(),
        publish_phone: req.publish_phone.unwrap_or(false),
        publish_status: req.publish_status.unwrap_or(false),
        role: req.role.unwrap_or(UserRole::Student),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> UserCreate {
        serde_json::from_str(r#"{"email":"A@X.com ","password":"longenough"}"#).unwrap()
    }

    #[test]
    fn minimal_payload_gets_all_defaults() {
        let req = minimal();
        let (email, password) = validate_registration(&req).unwrap();
        let new = fill_creation_defaults(req, email, format!("hash:{password}"));

        assert_eq!(new.email, "a@x.com");
        assert_eq!(new.first_name, "");
        assert_eq!(new.last_name, "");
        assert_eq!(new.avatar, "");
        assert_eq!(new.date_of_birth, "");
        assert_eq!(new.phone, "");
        assert_eq!(new.country, "");
        assert_eq!(new.region, "");
        assert_eq!(new.district, "");
        assert!(!new.publish_phone);
        assert!(!new.publish_status);
        assert_eq!(new.role, UserRole::Student);
    }

    #[test]
    fn provided_fields_survive_default_fill() {
        let req: UserCreate = serde_json::from_str(
            r#"{"email":"a@x.com","password":"longenough",
                "first_name":"Ada","publish_phone":true,"role":"company"}"#,
        )
        .unwrap();
        let (email, _) = validate_registration(&req).unwrap();
        let new = fill_creation_defaults(req, email, "h".into());

        assert_eq!(new.first_name, "Ada");
        assert!(new.publish_phone);
        assert!(!new.publish_status);
        assert_eq!(new.role, UserRole::Company);
        assert_eq!(new.last_name, "");
    }

    #[test]
    fn missing_email_is_a_validation_error() {
        let req: UserCreate = serde_json::from_str(r#"{"password":"longenough"}"#).unwrap();
        let err = validate_registration(&req).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn blank_email_is_a_validation_error() {
        let req: UserCreate =
            serde_json::from_str(r#"{"email":"   ","password":"longenough"}"#).unwrap();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let req: UserCreate =
            serde_json::from_str(r#"{"email":"not-an-email","password":"longenough"}"#).unwrap();
        let err = validate_registration(&req).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn short_password_is_rejected() {
        let req: UserCreate =
            serde_json::from_str(r#"{"email":"a@x.com","password":"short"}"#).unwrap();
        let err = validate_registration(&req).unwrap_err();
        assert!(err.to_string().contains("password"));
    }
}
