//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use axum::Router;
use axum::routing::{get, post};

use nilan_app::ports::{EventPublisher, NilanDevice};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<D, EP>() -> Router<AppState<D, EP>>
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/sensors", get(sensors::list::<D, EP>))
        .route("/sensors/{unique_id}", get(sensors::get::<D, EP>))
        .route("/sensors/{unique_id}/refresh", post(sensors::refresh::<D, EP>))
}
