use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::query;
use crate::server::AppState;
use crate::server::dto::{CitizenDetailsResponse, CitizenSummary, TwoCitizensResponse};
use crate::server::response::{ApiError, ApiResponse, QueryResultExt};
use crate::server::validation::parse_path_ids;

pub async fn get_citizen(
    State(state): State<Arc<AppState>>,
    Path(citizen_id): Path<String>,
) -> impl IntoResponse {
    let [id] = parse_path_ids([citizen_id.as_str()], "Citizen")?;

    let profile = query::citizen_profile(state.store.as_ref(), id).api_err("Citizen")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(CitizenDetailsResponse::from(profile))))
}

pub async fn compare_citizens(
    State(state): State<Arc<AppState>>,
    Path((citizen_a_id, citizen_b_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let [a, b] = parse_path_ids([citizen_a_id.as_str(), citizen_b_id.as_str()], "Citizen")?;

    let comparison = query::compare_citizens(state.store.as_ref(), a, b).api_err("Citizen")?;

    let response = TwoCitizensResponse {
        citizens: comparison.citizens.iter().map(CitizenSummary::from).collect(),
        common_live_brown_eyed_friends: comparison
            .common_friends
            .iter()
            .map(CitizenSummary::from)
            .collect(),
    };

    Ok::<_, ApiError>(Json(ApiResponse::success(response)))
}
