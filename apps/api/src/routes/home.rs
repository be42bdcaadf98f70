use axum::extract::Query;
use serde::Serialize;

use crate::render::{FlashQuery, Page};

#[derive(Debug, Serialize)]
pub struct HomeView {}

/// GET /
pub async fn handle_home(Query(flash): Query<FlashQuery>) -> Page<HomeView> {
    Page::new("home.html", HomeView {}).with_flash(&flash)
}
