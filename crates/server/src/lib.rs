pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{app, build_state, run};
pub use state::AppState;
