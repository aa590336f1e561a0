use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub city: Option<String>,
    pub metro: Option<String>,
    pub job_type: Option<String>,
    pub schedule: Option<String>,
    pub experience: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub city: Option<String>,
    pub metro: Option<String>,
    pub job_type: Option<String>,
    pub schedule: Option<String>,
    pub experience: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobFilter {
    pub company: Option<Uuid>,
}
