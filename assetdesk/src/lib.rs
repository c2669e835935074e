pub mod config;
pub mod core;
pub mod entities;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod registry;
pub mod routes;
pub mod schema;
pub mod validation;

pub use config::{AppConfig, PagingConfig};
pub use crate::core::Filterable;
pub use errors::ApiError;
pub use registry::EntityKind;
pub use routes::{AppState, api_router};
pub use serde_with;
