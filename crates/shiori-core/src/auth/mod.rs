//! Auth domain: credentials and the gateway trait.

pub mod gateway;
pub mod model;

pub use gateway::AuthGateway;
pub use model::{Credentials, TokenResponse};
