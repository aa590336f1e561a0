use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub founded_year: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub founded_year: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyFilter {
    pub user: Option<Uuid>,
}
