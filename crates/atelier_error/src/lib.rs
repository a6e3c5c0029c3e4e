//! Error types for the Atelier content staging engine.
//!
//! This crate provides the foundation error types used throughout the Atelier
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
//!
//! fn resolve_key() -> AtelierResult<String> {
//!     Err(GatewayError::new(GatewayErrorKind::Resolve("no such key".to_string())))?
//! }
//!
//! match resolve_key() {
//!     Ok(url) => println!("Resolved: {}", url),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commit;
mod config;
mod error;
mod gateway;
mod staging;
mod validation;

pub use commit::{CommitError, CommitErrorKind};
pub use config::ConfigError;
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
pub use gateway::{GatewayError, GatewayErrorKind};
pub use staging::{StagingError, StagingErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
