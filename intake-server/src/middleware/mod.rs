pub mod logging;
pub mod timeout;

pub use logging::logging_middleware;
pub use timeout::render_timeout;
