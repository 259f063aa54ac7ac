//! REST client for the media server.
//!
//! - [`ApiClient`]: one method per backend endpoint
//! - [`PlayerApi`] / [`PlaylistApi`]: trait seams used by [`crate::actions`]
//! - request bodies in [`types`]

mod client;
mod traits;
pub mod types;

pub use client::{ApiClient, ApiError, ApiResult};
pub use traits::{PlayerApi, PlaylistApi};
