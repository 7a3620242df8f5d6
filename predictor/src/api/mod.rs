pub mod models;
pub mod page;
pub mod routes;

pub use routes::{routes, AppState};
