use axum::{
    extract::{Query, State},
    response::Redirect,
    Form,
};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{error, info};

use crate::errors::AppError;
use crate::forms::Required;
use crate::models::recommendation::RecommendationRequestRow;
use crate::render::{redirect_with_notice, FlashQuery, NoticeCode, Page};
use crate::state::AppState;

const PATH: &str = "/recommendations";

#[derive(Debug, Deserialize)]
pub struct RecommendationForm {
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub teacher_name: Option<String>,
    pub teacher_email: Option<String>,
    pub deadline: Option<String>,
    pub purpose: Option<String>,
}

/// Every field is required; emails and deadline are stored as typed.
#[derive(Debug, Clone)]
pub struct NewRecommendationRequest {
    pub student_name: String,
    pub student_email: String,
    pub teacher_name: String,
    pub teacher_email: String,
    pub deadline: String,
    pub purpose: String,
}

impl TryFrom<RecommendationForm> for NewRecommendationRequest {
    type Error = AppError;

    fn try_from(form: RecommendationForm) -> Result<Self, Self::Error> {
        let mut required = Required::new();
        let request = NewRecommendationRequest {
            student_name: required.take("student_name", form.student_name),
            student_email: required.take("student_email", form.student_email),
            teacher_name: required.take("teacher_name", form.teacher_name),
            teacher_email: required.take("teacher_email", form.teacher_email),
            deadline: required.take("deadline", form.deadline),
            purpose: required.take("purpose", form.purpose),
        };
        required.finish()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsView {
    pub requests: Vec<RecommendationRequestRow>,
}

pub async fn insert_request(
    conn: &mut SqliteConnection,
    request: &NewRecommendationRequest,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO recommendation_requests
            (student_name, student_email, teacher_name, teacher_email, deadline, purpose)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&request.student_name)
    .bind(&request.student_email)
    .bind(&request.teacher_name)
    .bind(&request.teacher_email)
    .bind(&request.deadline)
    .bind(&request.purpose)
    .execute(conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// All requests, newest first. Unpaginated.
pub async fn list_requests(
    conn: &mut SqliteConnection,
) -> Result<Vec<RecommendationRequestRow>, sqlx::Error> {
    sqlx::query_as::<_, RecommendationRequestRow>(
        r#"
        SELECT id, student_name, student_email, teacher_name, teacher_email, deadline, purpose, created_at
        FROM recommendation_requests
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(conn)
    .await
}

async fn load_requests(pool: &SqlitePool) -> Result<Vec<RecommendationRequestRow>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    list_requests(&mut conn).await
}

async fn store_request(
    pool: &SqlitePool,
    request: &NewRecommendationRequest,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let id = insert_request(&mut tx, request).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /recommendations
pub async fn handle_list_recommendations(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Page<RecommendationsView> {
    match load_requests(&state.db).await {
        Ok(requests) => {
            Page::new("recommendations.html", RecommendationsView { requests }).with_flash(&flash)
        }
        Err(e) => {
            error!("Failed to load recommendation requests: {e}");
            Page::new(
                "recommendations.html",
                RecommendationsView {
                    requests: Vec::new(),
                },
            )
            .with_flash(&flash)
            .with_notice(NoticeCode::RecommendationsLoadFailed)
        }
    }
}

/// POST /recommendations
pub async fn handle_submit_recommendation(
    State(state): State<AppState>,
    Form(form): Form<RecommendationForm>,
) -> Result<Redirect, AppError> {
    let request = NewRecommendationRequest::try_from(form)?;

    match store_request(&state.db, &request).await {
        Ok(id) => {
            info!(request_id = id, teacher = %request.teacher_email, "recommendation requested");
            Ok(redirect_with_notice(PATH, NoticeCode::RecommendationSubmitted))
        }
        Err(e) => {
            error!("Failed to store recommendation request: {e}");
            Ok(redirect_with_notice(PATH, NoticeCode::RecommendationFailed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn request(student: &str) -> NewRecommendationRequest {
        NewRecommendationRequest {
            student_name: student.to_string(),
            student_email: format!("{}@school.edu", student.to_lowercase()),
            teacher_name: "Dr. Hopper".to_string(),
            teacher_email: "hopper@school.edu".to_string(),
            deadline: "next friday".to_string(),
            purpose: "Graduate school".to_string(),
        }
    }

    #[test]
    fn test_all_fields_required() {
        let form = RecommendationForm {
            student_name: Some("Ada".into()),
            student_email: None,
            teacher_name: None,
            teacher_email: None,
            deadline: None,
            purpose: None,
        };
        match NewRecommendationRequest::try_from(form) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields.len(), 5),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_listed_newest_first() {
        let pool = test_pool().await;
        store_request(&pool, &request("Ada")).await.unwrap();
        store_request(&pool, &request("Grace")).await.unwrap();

        let requests = load_requests(&pool).await.unwrap();
        let names: Vec<&str> = requests.iter().map(|r| r.student_name.as_str()).collect();
        assert_eq!(names, vec!["Grace", "Ada"]);
        // Deadline is free text.
        assert_eq!(requests[0].deadline, "next friday");
    }
}
