//! Bunny Stream API client library.
//!
//! This module provides a blocking client for the video endpoints of a Stream library: listing,
//! fetching, creating, updating and deleting videos, uploading or fetching their source files,
//! and managing captions.
//!
//! # Layers
//!
//! - [`queries`]: builders for the parameters of calls that take more than an ID.
//! - [`client::StreamClient`]: one method per API operation. Checks the parameters, then hands
//!   a single request to the executor.
//! - `executor`: adds the `AccessKey` header, encodes the query string or body, sends the
//!   request and classifies the response.
//! - [`videos`]: tolerant typed views over the returned JSON documents.
//! - [`error`]: the error taxonomy and the HTTP status classifier.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use bunny_stream::{ListVideoQuery, StreamClient};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = StreamClient::new("your-api-key", 1);
//!
//! let query = ListVideoQuery::builder().page(1).per_page(20).build()?;
//! let page = client.list_videos(&query)?;
//! for video in page.list()? {
//!     println!("{} ({})", video.title(), video.guid());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod executor;
pub mod queries;
pub mod types;
pub mod videos;

pub use client::StreamClient;
pub use error::{ApiError, Error, StatusCategory, classify};
pub use queries::{
    AddCaptionQuery, AddCaptionQueryBuilder, ListVideoQuery, ListVideoQueryBuilder,
    UpdateVideoQuery, UpdateVideoQueryBuilder,
};
pub use types::Fields;
pub use videos::{ListVideoResponse, Video};
