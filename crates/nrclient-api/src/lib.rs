//! Client handles for the New Relic REST v2, Infrastructure and Synthetics APIs.

pub mod error;
pub mod http;
pub mod infra;
pub mod rest;
pub mod synthetics;

pub use error::ClientError;
pub use infra::InfraClient;
pub use rest::{ApiClient, ApiConfig};
pub use synthetics::{SyntheticsClient, SyntheticsConfig};
