pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod headers;
pub mod hooks;
pub mod models;
pub mod regions;
pub mod response;

pub use client::{ClientOptions, MyBmwClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use fetch::auth::{Authentication, StaticToken};
pub use models::{CarBrand, GpsPosition, ValueWithUnit};
pub use regions::Region;
pub use response::ApiResponse;
