//! Admin moderation of job postings.
//!
//! `approved` only ever moves false -> true. Rejecting deletes the row (and,
//! through the foreign key, its applications); there is no rejected state.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{error, info};

use crate::jobs::store::list_pending;
use crate::models::job::JobPostingRow;
use crate::render::{redirect_with_notice, FlashQuery, NoticeCode, Page};
use crate::state::AppState;

const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
}

impl Transition {
    fn sql(self) -> &'static str {
        match self {
            // Re-approving matches the row again, so it still counts as applied.
            Transition::Approve => "UPDATE job_postings SET approved = 1 WHERE id = ?",
            Transition::Reject => "DELETE FROM job_postings WHERE id = ?",
        }
    }

    fn success(self) -> NoticeCode {
        match self {
            Transition::Approve => NoticeCode::JobApproved,
            Transition::Reject => NoticeCode::JobRejected,
        }
    }

    fn failure(self) -> NoticeCode {
        match self {
            Transition::Approve => NoticeCode::JobApproveFailed,
            Transition::Reject => NoticeCode::JobRejectFailed,
        }
    }

    pub async fn apply(self, conn: &mut SqliteConnection, id: i64) -> Result<Outcome, sqlx::Error> {
        let result = sqlx::query(self.sql()).bind(id).execute(conn).await?;
        Ok(if result.rows_affected() == 0 {
            Outcome::NotFound
        } else {
            Outcome::Applied
        })
    }
}

async fn apply_in_transaction(
    pool: &SqlitePool,
    transition: Transition,
    id: i64,
) -> Result<Outcome, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let outcome = transition.apply(&mut tx, id).await?;
    tx.commit().await?;
    Ok(outcome)
}

async fn moderate(state: &AppState, transition: Transition, id: i64) -> Redirect {
    match apply_in_transaction(&state.db, transition, id).await {
        Ok(Outcome::Applied) => {
            info!(job_id = id, ?transition, "moderated job posting");
            redirect_with_notice(ADMIN_PATH, transition.success())
        }
        Ok(Outcome::NotFound) => redirect_with_notice(ADMIN_PATH, NoticeCode::JobNotFound),
        Err(e) => {
            error!(job_id = id, ?transition, "Failed to moderate job posting: {e}");
            redirect_with_notice(ADMIN_PATH, transition.failure())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub jobs: Vec<JobPostingRow>,
}

/// GET /admin
pub async fn handle_admin(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Page<AdminView> {
    let pending = match state.db.acquire().await {
        Ok(mut conn) => list_pending(&mut conn).await,
        Err(e) => Err(e),
    };

    match pending {
        Ok(jobs) => Page::new("admin.html", AdminView { jobs }).with_flash(&flash),
        Err(e) => {
            error!("Failed to load pending job postings: {e}");
            Page::new("admin.html", AdminView { jobs: Vec::new() })
                .with_flash(&flash)
                .with_notice(NoticeCode::PendingLoadFailed)
        }
    }
}

/// POST /approve_job/:id
pub async fn handle_approve_job(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    moderate(&state, Transition::Approve, id).await
}

/// POST /reject_job/:id
pub async fn handle_reject_job(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    moderate(&state, Transition::Reject, id).await
}
