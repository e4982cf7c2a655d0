//! # SchoolGate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: session token signing configuration
//! - [`session`]: session storage location, key prefix, and admin policy
//!
//! # Example
//!
//! ```ignore
//! use schoolgate_config::{JwtConfig, SessionConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! ```

pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use jwt::JwtConfig;
pub use session::{AdminPolicy, SessionConfig};
