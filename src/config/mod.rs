pub mod seed;
pub mod settings;

pub use settings::AppConfig;
