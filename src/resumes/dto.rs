use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ResumeCreate {
    pub title: String,
    pub photo: Option<String>,
    pub city: Option<String>,
    pub metro: Option<String>,
    pub skills: Option<serde_json::Value>,
    pub experience_years: Option<i32>,
    pub current_position: Option<String>,
    pub degree: Option<String>,
    pub university: Option<String>,
    pub graduation_year: Option<i32>,
    pub specialization: Option<String>,
    pub expected_salary: Option<i32>,
    pub languages: Option<serde_json::Value>,
    pub availability: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResumeUpdate {
    pub title: Option<String>,
    pub photo: Option<String>,
    pub city: Option<String>,
    pub metro: Option<String>,
    pub skills: Option<serde_json::Value>,
    pub experience_years: Option<i32>,
    pub current_position: Option<String>,
    pub degree: Option<String>,
    pub university: Option<String>,
    pub graduation_year: Option<i32>,
    pub specialization: Option<String>,
    pub expected_salary: Option<i32>,
    pub languages: Option<serde_json::Value>,
    pub availability: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeFilter {
    pub user: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_only_patch_leaves_other_fields_unset() {
        let upd: ResumeUpdate = serde_json::from_str(r#"{"title":"Junior Rust Engineer"}"#).unwrap();
        assert_eq!(upd.title.as_deref(), Some("Junior Rust Engineer"));
        assert!(upd.photo.is_none());
        assert!(upd.skills.is_none());
        assert!(upd.expected_salary.is_none());
        assert!(upd.status.is_none());
    }
}
