use axum::{
    extract::{Query, State},
    response::Redirect,
    Form,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::query::{JobFilter, JobsQuery};
use crate::jobs::store::{insert_posting, search_listing, Listing, NewJobPosting};
use crate::jobs::{STANDARD_CATEGORIES, STANDARD_JOB_TYPES};
use crate::models::job::JobPostingRow;
use crate::render::{redirect_with_notice, FlashQuery, NoticeCode, Page};
use crate::state::AppState;

const EMPLOYER_PATH: &str = "/employer";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Employer posting form. Any `approved` value sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct PostJobForm {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobsView {
    pub jobs: Vec<JobPostingRow>,
    pub categories: Vec<String>,
    pub job_types: Vec<String>,
    pub current_search: String,
    pub current_type: String,
    pub current_category: String,
}

impl JobsView {
    fn new(listing: Listing, filter: &JobFilter) -> Self {
        JobsView {
            jobs: listing.jobs,
            categories: listing.categories,
            job_types: listing.job_types,
            current_search: filter.current_search().to_string(),
            current_type: filter.current_type().to_string(),
            current_category: filter.current_category().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployerView {
    pub job_types: &'static [&'static str],
    pub categories: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn load_listing(pool: &SqlitePool, filter: &JobFilter) -> Result<Listing, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    search_listing(&mut conn, filter).await
}

/// GET /jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Page<JobsView> {
    let filter = JobFilter::from(&query);
    let flash = FlashQuery {
        notice: query.notice,
    };

    match load_listing(&state.db, &filter).await {
        Ok(listing) => Page::new("jobs.html", JobsView::new(listing, &filter)).with_flash(&flash),
        Err(e) => {
            error!("Failed to load job listings: {e}");
            Page::new("jobs.html", JobsView::new(Listing::default(), &filter))
                .with_flash(&flash)
                .with_notice(NoticeCode::JobsLoadFailed)
        }
    }
}

/// GET /employer
pub async fn handle_employer(Query(flash): Query<FlashQuery>) -> Page<EmployerView> {
    Page::new(
        "employer.html",
        EmployerView {
            job_types: STANDARD_JOB_TYPES,
            categories: STANDARD_CATEGORIES,
        },
    )
    .with_flash(&flash)
}

async fn store_posting(pool: &SqlitePool, posting: &NewJobPosting) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let id = insert_posting(&mut tx, posting).await?;
    tx.commit().await?;
    Ok(id)
}

/// POST /post_job
pub async fn handle_post_job(
    State(state): State<AppState>,
    Form(form): Form<PostJobForm>,
) -> Result<Redirect, AppError> {
    let posting = NewJobPosting::validate(
        form.title,
        form.company,
        form.location,
        form.description,
        form.category,
        form.job_type,
        form.salary,
        form.deadline,
    )?;

    match store_posting(&state.db, &posting).await {
        Ok(id) => {
            info!(job_id = id, company = %posting.company, "job posting submitted for approval");
            Ok(redirect_with_notice(EMPLOYER_PATH, NoticeCode::JobPosted))
        }
        Err(e) => {
            error!("Failed to store job posting: {e}");
            Ok(redirect_with_notice(EMPLOYER_PATH, NoticeCode::JobPostFailed))
        }
    }
}
