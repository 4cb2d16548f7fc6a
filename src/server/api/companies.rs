use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::citizen_url;
use crate::query::{self, CompanyEmployees};
use crate::server::AppState;
use crate::server::dto::{CompanyEmployeesResponse, EmployeeLink};
use crate::server::response::{ApiError, ApiResponse, QueryResultExt};
use crate::server::validation::parse_path_ids;

pub async fn list_company_employees(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<String>,
) -> Result<Response, ApiError> {
    let [id] = parse_path_ids([company_id.as_str()], "Company")?;

    let result = query::get_company_employees(state.store.as_ref(), id).api_err("Company")?;

    let (company, employees) = match result {
        CompanyEmployees::NoEmployees(_) => return Ok(StatusCode::NO_CONTENT.into_response()),
        CompanyEmployees::Employees { company, employees } => (company, employees),
    };

    let response = CompanyEmployeesResponse {
        company_id: company.id,
        company_name: company.name,
        employees: employees
            .into_iter()
            .map(|citizen| EmployeeLink {
                url: citizen_url(citizen.id),
                id: citizen.id,
                username: citizen.name,
            })
            .collect(),
    };

    Ok(Json(ApiResponse::success(response)).into_response())
}
