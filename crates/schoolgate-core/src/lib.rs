//! # SchoolGate Core
//!
//! Core types shared by the SchoolGate crates:
//!
//! - [`errors`]: [`AppError`] and its [`ErrorKind`]
//! - [`permissions`]: the [`Resource`] and [`Action`] vocabulary of the permission gate

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use permissions::{Action, ParseError, Resource};
