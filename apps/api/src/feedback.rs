use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{error, info};

use crate::errors::AppError;
use crate::forms::{optional, Required};
use crate::render::{redirect_with_notice, FlashQuery, NoticeCode, Page};
use crate::state::AppState;

const TEMPLATE: &str = "feedback.html";

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub kind: String,
    pub message: String,
    pub email: String,
}

impl TryFrom<FeedbackForm> for NewFeedback {
    type Error = AppError;

    fn try_from(form: FeedbackForm) -> Result<Self, Self::Error> {
        let mut required = Required::new();
        let feedback = NewFeedback {
            kind: required.take("type", form.kind),
            message: required.take("message", form.message),
            email: optional(form.email),
        };
        required.finish()?;
        Ok(feedback)
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackView {}

pub async fn insert_feedback(
    conn: &mut SqliteConnection,
    feedback: &NewFeedback,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO feedback (type, message, email) VALUES (?, ?, ?)")
        .bind(&feedback.kind)
        .bind(&feedback.message)
        .bind(&feedback.email)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

async fn store_feedback(pool: &SqlitePool, feedback: &NewFeedback) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let id = insert_feedback(&mut tx, feedback).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /feedback
pub async fn handle_feedback_form(Query(flash): Query<FlashQuery>) -> Page<FeedbackView> {
    Page::new(TEMPLATE, FeedbackView {}).with_flash(&flash)
}

/// POST /feedback
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, AppError> {
    let feedback = NewFeedback::try_from(form)?;

    match store_feedback(&state.db, &feedback).await {
        Ok(id) => {
            info!(feedback_id = id, kind = %feedback.kind, "feedback received");
            Ok(redirect_with_notice("/feedback", NoticeCode::FeedbackSubmitted).into_response())
        }
        Err(e) => {
            error!("Failed to store feedback: {e}");
            Ok(Page::new(TEMPLATE, FeedbackView {})
                .with_notice(NoticeCode::FeedbackFailed)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::feedback::FeedbackRow;

    #[test]
    fn test_missing_type_and_message_rejected() {
        let form = FeedbackForm {
            kind: None,
            message: Some("".into()),
            email: Some("a@b.c".into()),
        };
        match NewFeedback::try_from(form) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["type", "message"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_absent_email_stored_as_empty() {
        let pool = test_pool().await;
        let feedback = NewFeedback::try_from(FeedbackForm {
            kind: Some("bug".into()),
            message: Some("Search is slow".into()),
            email: None,
        })
        .unwrap();

        let id = store_feedback(&pool, &feedback).await.unwrap();

        let row: FeedbackRow = sqlx::query_as("SELECT * FROM feedback WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.kind, "bug");
        assert_eq!(row.email.as_deref(), Some(""));
    }
}
