//! # gtview-client - Comparison Backend Gateway
//!
//! Typed wrappers over the backend's REST API: run listings, detail pages,
//! three-way views, comparison submission, unprocessed folder listings and
//! run deletion.
//!
//! Non-2xx responses and transport failures become
//! [`gtview_core::Error::RequestFailed`]; a three-way view with no body
//! becomes [`gtview_core::Error::EmptyPayload`].

pub mod client;
pub mod endpoints;

pub use client::{parse_base_url, ApiClient, DEFAULT_TIMEOUT};
pub use endpoints::Endpoint;
