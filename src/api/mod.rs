pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
