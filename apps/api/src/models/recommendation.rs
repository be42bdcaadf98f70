use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRequestRow {
    pub id: i64,
    pub student_name: String,
    pub student_email: String,
    pub teacher_name: String,
    pub teacher_email: String,
    pub deadline: String,
    pub purpose: String,
    pub created_at: NaiveDateTime,
}
