use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ChatStatusUpdate {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatFilter {
    pub application: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub content: String,
    pub message_type: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_create_defaults_are_absent_not_empty() {
        let m: MessageCreate = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert_eq!(m.content, "hi");
        assert!(m.message_type.is_none());
        assert!(m.metadata.is_none());
    }
}
