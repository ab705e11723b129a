//! # nilan-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** over the entity registry
//!   (`/api/sensors`, `/api/sensors/{unique_id}`, …)
//! - Map HTTP requests into registry calls (driving adapter)
//! - Map [`NilanError`](nilan_domain::error::NilanError) into HTTP status codes
//!
//! ## Dependency rule
//! Depends on `nilan-app` (for ports and the registry) and `nilan-domain`
//! (for response types). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
