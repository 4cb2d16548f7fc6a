mod citizens;
mod companies;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::server::AppState;

/// Citizen URL used when linking to a citizen from other responses.
#[must_use]
pub fn citizen_url(id: i64) -> String {
    format!("/api/v1/citizens/{id}")
}

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Citizens
        .route("/citizens/{citizen_id}", get(citizens::get_citizen))
        .route(
            "/citizens/{citizen_a_id}/{citizen_b_id}",
            get(citizens::compare_citizens),
        )
        // Companies
        .route(
            "/company_employees/{company_id}",
            get(companies::list_company_employees),
        )
}
