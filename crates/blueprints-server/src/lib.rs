pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::ApiError;
pub use server::{build_router, start, AppState, ServerConfig, ServerHandle};
