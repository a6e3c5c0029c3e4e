//! Object store gateway and entity API seams for Atelier.
//!
//! This crate defines the narrow contracts Atelier has with its external
//! collaborators: the key-addressed object store, the URL content fetcher,
//! and the entity CRUD API. Two object-store backends ship with it:
//!
//! - [`MemoryGateway`] keeps objects in a process-local map and pairs with
//!   [`MemoryFetcher`] so engine logic can be exercised without I/O.
//! - [`FileSystemGateway`] stores blobs under a base directory with
//!   content-addressed keys and atomic writes.
//!
//! # Example
//!
//! ```rust
//! use atelier_gateway::{MemoryGateway, ObjectStoreGateway, UploadOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = MemoryGateway::new();
//! let receipt = gateway
//!     .upload(b"blob", "drafts/abc", &UploadOptions::default())
//!     .await?;
//!
//! let url = gateway.resolve_url(receipt.public_id()).await?;
//! assert!(url.starts_with("memory://"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod fetch;
mod filesystem;
mod gateway;
mod memory;

pub use api::{Entity, EntityApi, EntityPayload};
pub use fetch::{ContentFetcher, HttpContentFetcher};
pub use filesystem::FileSystemGateway;
pub use gateway::{ObjectStoreGateway, UploadOptions, UploadReceipt};
pub use memory::{MemoryFetcher, MemoryGateway};
