use serde::Deserialize;
use uuid::Uuid;

use super::repo::ApplicationStatus;

#[derive(Debug, Deserialize)]
pub struct ApplicationCreate {
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationFilter {
    pub user: Option<Uuid>,
    pub job: Option<Uuid>,
}
