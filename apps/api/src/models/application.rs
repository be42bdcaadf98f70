use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An application joined with the title and company of the job it targets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub job_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub resume_filename: Option<String>,
    pub cover_letter: Option<String>,
    pub submission_date: NaiveDateTime,
    pub title: String,
    pub company: String,
}
