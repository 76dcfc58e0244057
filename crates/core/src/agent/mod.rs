//! Agent Service access
//!
//! [`AgentsApi`] is the seam between the orchestration code and the platform;
//! [`ProjectClient`] implements it over the project's REST endpoint.

mod api;
mod model;
mod project_client;

pub use api::AgentsApi;
pub use model::*;
pub use project_client::ProjectClient;
