//! Async HTTP client for the feature-store registry REST API.
//!
//! The registry exposes a single resource collection, `/features`, with
//! keyword search and page/limit pagination on the list endpoint. This
//! crate wraps `reqwest::Client` with registry URL construction, uniform
//! status handling, and JSON decoding:
//!
//! - **[`RegistryClient`]** — list / get / create / update / delete over
//!   `/features`. Every operation returns `Result<T, Error>`; non-2xx
//!   responses become [`Error::Api`] carrying the status code and body,
//!   so callers branch on one channel instead of mixing thrown and
//!   returned failures.
//! - **[`TransportConfig`]** — shared timeout and TLS settings for
//!   building the underlying HTTP client.
//! - **Domain model** — [`Feature`] with its opaque [`FeatureId`], and
//!   [`FeaturePage`] pairing a page of rows with the backend-reported
//!   total count.

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::RegistryClient;
pub use error::Error;
pub use model::{Feature, FeatureId, FeaturePage};
pub use transport::{TlsMode, TransportConfig};
