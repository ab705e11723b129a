//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use nilan_app::ports::{EventPublisher, NilanDevice};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level.
pub fn build<D, EP>(state: AppState<D, EP>) -> Router
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use nilan_app::event_bus::InProcessEventBus;
    use nilan_app::sensor_platform::setup_entry;
    use nilan_app::services::entity_registry::EntityRegistry;
    use nilan_domain::error::NilanError;
    use nilan_domain::platform::Platform;
    use nilan_domain::value::SensorValue;

    use super::*;

    struct StubDevice {
        values: Mutex<HashMap<String, SensorValue>>,
    }

    impl NilanDevice for StubDevice {
        fn assigned(&self, _platform: Platform) -> Vec<String> {
            vec!["get_humidity".to_string(), "get_display_text_1".to_string()]
        }

        fn read(
            &self,
            attribute: &str,
        ) -> impl Future<Output = Result<SensorValue, NilanError>> + Send {
            let result = self
                .values
                .lock()
                .unwrap()
                .get(attribute)
                .cloned()
                .ok_or_else(|| NilanError::device(std::io::Error::other("no reply")));
            async move { result }
        }
    }

    async fn test_app() -> (Router, Arc<StubDevice>) {
        let device = Arc::new(StubDevice {
            values: Mutex::new(HashMap::from([
                ("get_humidity".to_string(), SensorValue::Int(54)),
                ("get_display_text_1".to_string(), SensorValue::from("HEATING")),
            ])),
        });
        let registry = Arc::new(EntityRegistry::new(InProcessEventBus::new(16)));
        setup_entry(Arc::clone(&device), registry.as_ref())
            .await
            .unwrap();
        (build(AppState::new(registry)), device)
    }

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_registered_sensors() {
        let (app, _) = test_app().await;
        let (status, json) = call(app, "GET", "/api/sensors").await;

        assert_eq!(status, StatusCode::OK);
        let sensors = json.as_array().unwrap();
        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[0]["unique_id"], "display_text_line_1");
        assert_eq!(sensors[1]["unique_id"], "humidity");
    }

    #[tokio::test]
    async fn should_get_sensor_with_descriptor_metadata() {
        let (app, _) = test_app().await;
        let (status, json) = call(app, "GET", "/api/sensors/humidity").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["unit"], "%");
        assert_eq!(json["device_class"], "humidity");
        assert_eq!(json["state_class"], "measurement");
        assert_eq!(json["native_value"], 54);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_sensor() {
        let (app, _) = test_app().await;
        let (status, json) = call(app, "GET", "/api/sensors/unicorn").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Sensor unicorn not found");
    }

    #[tokio::test]
    async fn should_refresh_sensor_on_post() {
        let (app, device) = test_app().await;
        device
            .values
            .lock()
            .unwrap()
            .insert("get_humidity".to_string(), SensorValue::Int(60));

        let (status, json) = call(app, "POST", "/api/sensors/humidity/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["native_value"], 60);
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_device_fails() {
        let (app, device) = test_app().await;
        device.values.lock().unwrap().remove("get_humidity");

        let (status, json) = call(app, "POST", "/api/sensors/humidity/refresh").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "device unavailable");
    }
}
