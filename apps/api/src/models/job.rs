use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub job_type: String,
    pub salary: Option<String>,
    pub posted_date: NaiveDateTime,
    pub deadline: Option<String>,
    pub approved: bool,
}
