pub mod health;
pub mod upload;

pub use health::health_handler;
pub use upload::upload_handler;
