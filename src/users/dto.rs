use serde::Deserialize;

use super::repo::UserRole;

/// Registration payload. Everything except `email` and `password` is
/// optional; absent fields get creation defaults (see `services`).
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub publish_phone: Option<bool>,
    pub publish_status: Option<bool>,
    pub role: Option<UserRole>,
}

/// Profile patch. `None` means "leave unchanged"; email, role and the
/// credential are not updatable through this surface.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub publish_phone: Option<bool>,
    pub publish_status: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_minimal_payload() {
        let req: UserCreate =
            serde_json::from_str(r#"{"email":"a@x.com","password":"p"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@x.com"));
        assert!(req.first_name.is_none());
        assert!(req.role.is_none());
    }

    #[test]
    fn create_ignores_unrecognized_fields() {
        let req: UserCreate =
            serde_json::from_str(r#"{"email":"a@x.com","password":"p","nonsense":42}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn update_with_empty_body_changes_nothing() {
        let upd: UserUpdate = serde_json::from_str("{}").unwrap();
        assert!(upd.first_name.is_none());
        assert!(upd.publish_phone.is_none());
    }
}
