//! HTTP request handlers for the contractor billing API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::service::{ContractorRegistration, TermsUpdate};

use super::request::{
    NewBillingRequest, NewContractorRequest, ReportQuery, UpdateTermsRequest,
    UpdateWorkedHoursRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/contractors", get(list_contractors).post(add_contractor))
        .route(
            "/contractors/:id",
            get(get_contractor).delete(delete_contractor),
        )
        .route("/contractors/:id/terms", patch(update_terms))
        .route("/billings", get(list_billings).post(create_billing))
        .route("/billings/report", get(monthly_report))
        .route(
            "/billings/:id",
            get(get_billing)
                .put(update_worked_hours)
                .delete(delete_billing),
        )
        .with_state(state)
}

// =============================================================================
// Contractors
// =============================================================================

/// Handler for POST /contractors.
async fn add_contractor(
    State(state): State<AppState>,
    payload: Result<Json<NewContractorRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing contractor registration");

    let request = read_json(correlation_id, payload)?;
    let registration =
        ContractorRegistration::try_from(request).map_err(|e| engine_error(correlation_id, e))?;
    let contractor = state
        .service()
        .add_contractor(registration)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        contractor_id = contractor.id,
        "Contractor registration completed"
    );
    Ok((StatusCode::CREATED, Json(contractor)))
}

/// Handler for GET /contractors.
async fn list_contractors(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let contractors = state
        .service()
        .contractors()
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(contractors))
}

/// Handler for GET /contractors/:id.
async fn get_contractor(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = read_id(correlation_id, id)?;
    let contractor = state
        .service()
        .contractor(id)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(contractor))
}

/// Handler for DELETE /contractors/:id.
async fn delete_contractor(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = read_id(correlation_id, id)?;
    state
        .service()
        .delete_contractor(id)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(correlation_id = %correlation_id, contractor_id = id, "Contractor removed");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PATCH /contractors/:id/terms.
///
/// Applies every field present in the body; the change is all or nothing.
async fn update_terms(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
    payload: Result<Json<UpdateTermsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = read_id(correlation_id, id)?;
    info!(correlation_id = %correlation_id, contractor_id = id, "Processing terms update");

    let request = read_json(correlation_id, payload)?;
    let update = TermsUpdate::try_from(request).map_err(|e| engine_error(correlation_id, e))?;
    let contractor = state
        .service()
        .update_terms(id, &update)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(contractor))
}

// =============================================================================
// Billing records
// =============================================================================

/// Handler for POST /billings.
async fn create_billing(
    State(state): State<AppState>,
    payload: Result<Json<NewBillingRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing billing request");

    let request = read_json(correlation_id, payload)?;
    let period = request
        .period()
        .map_err(|e| engine_error(correlation_id, e))?;
    let record = state
        .service()
        .create_billing(request.contractor_id, period, request.worked_hours)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        billing_id = record.id(),
        contractor_id = record.contractor_id(),
        period = %period,
        profit = %record.profit(),
        "Billing completed successfully"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /billings.
async fn list_billings(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let records = state
        .service()
        .billings()
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(records))
}

/// Handler for GET /billings/:id.
async fn get_billing(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = read_id(correlation_id, id)?;
    let record = state
        .service()
        .billing(id)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(record))
}

/// Handler for PUT /billings/:id.
async fn update_worked_hours(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
    payload: Result<Json<UpdateWorkedHoursRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = read_id(correlation_id, id)?;
    info!(correlation_id = %correlation_id, billing_id = id, "Processing worked hours update");

    let request = read_json(correlation_id, payload)?;
    let record = state
        .service()
        .update_worked_hours(id, request.worked_hours)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(record))
}

/// Handler for DELETE /billings/:id.
async fn delete_billing(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = read_id(correlation_id, id)?;
    state
        .service()
        .delete_billing(id)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(correlation_id = %correlation_id, billing_id = id, "Billing record removed");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /billings/report?year=&month=.
async fn monthly_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid report query");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;

    let period = query.period().map_err(|e| engine_error(correlation_id, e))?;
    info!(correlation_id = %correlation_id, period = %period, "Processing report request");

    let report = state
        .service()
        .monthly_report(period)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(report))
}

// =============================================================================
// Extraction helpers
// =============================================================================

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn read_json<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message names the offending field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn read_id(correlation_id: Uuid, id: Result<Path<u32>, PathRejection>) -> ApiResult<u32> {
    id.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}
