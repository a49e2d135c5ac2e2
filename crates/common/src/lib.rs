pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, EndpointConfig};
pub use error::{ErrorKind, PaperBriefError};
pub type Result<T> = std::result::Result<T, PaperBriefError>;
