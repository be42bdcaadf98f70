pub mod health;
pub mod home;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::jobs::{handlers as jobs, moderation};
use crate::state::AppState;
use crate::{feedback, login, recommendations};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(home::handle_home))
        .route("/health", get(health::health_handler))
        // Students
        .route("/jobs", get(jobs::handle_list_jobs))
        .route("/jobs/:id/apply", post(applications::handle_apply))
        .route("/applications", get(applications::handle_list_applications))
        .route(
            "/recommendations",
            get(recommendations::handle_list_recommendations)
                .post(recommendations::handle_submit_recommendation),
        )
        // Visitors
        .route(
            "/feedback",
            get(feedback::handle_feedback_form).post(feedback::handle_submit_feedback),
        )
        .route(
            "/login",
            get(login::handle_login_form).post(login::handle_login),
        )
        // Employers
        .route("/employer", get(jobs::handle_employer))
        .route("/post_job", post(jobs::handle_post_job))
        // Admins
        .route("/admin", get(moderation::handle_admin))
        .route("/approve_job/:id", post(moderation::handle_approve_job))
        .route("/reject_job/:id", post(moderation::handle_reject_job))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
