//! JSON handlers for sensors.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use nilan_app::ports::{EventPublisher, NilanDevice};
use nilan_domain::sensor::SensorState;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<SensorState>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and refresh endpoints.
pub enum GetResponse {
    Ok(Json<SensorState>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/sensors`
pub async fn list<D, EP>(State(state): State<AppState<D, EP>>) -> ListResponse
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.registry.list()))
}

/// `GET /api/sensors/{unique_id}`
pub async fn get<D, EP>(
    State(state): State<AppState<D, EP>>,
    Path(unique_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let sensor = state.registry.get(&unique_id)?;
    Ok(GetResponse::Ok(Json(sensor)))
}

/// `POST /api/sensors/{unique_id}/refresh`
pub async fn refresh<D, EP>(
    State(state): State<AppState<D, EP>>,
    Path(unique_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let sensor = state.registry.refresh(&unique_id).await?;
    Ok(GetResponse::Ok(Json(sensor)))
}
