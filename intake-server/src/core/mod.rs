//! Server core: configuration, state, errors and lifecycle

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{BoxError, Config};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
