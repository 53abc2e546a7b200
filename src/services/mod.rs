pub mod overview;
pub mod server;
