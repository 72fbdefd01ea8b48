mod env;
mod error;
mod openapi;
mod pipeline;
mod routes;
mod state;

pub use env::{Env, env};
pub use error::{AppError, Result};
pub use openapi::openapi;
pub use pipeline::{Pipeline, Upload};
pub use routes::router;
pub use state::AppState;
