//! View-state controllers between `featctl-api` and UI consumers.
//!
//! The registry console has exactly two interactive surfaces, and this
//! crate owns the state and transitions for both:
//!
//! - **[`FeatureList`]** — the paginated, searchable feature table.
//!   One cohesive state object (page, limit, query, tab, rows, total,
//!   loading) updated through named transitions instead of a bundle of
//!   independent callbacks, plus a monotonic fetch sequence that
//!   discards stale responses when requests overlap.
//!
//! - **[`FeatureForm`]** — a single editable record. Pre-populates once
//!   from an existing feature, validates client-side before any network
//!   call, and branches create-vs-update on whether the record already
//!   carries an id.
//!
//! Controllers report user-facing outcomes as transient [`Notice`]s
//! which the UI layer drains and renders; hard failures that the caller
//! must handle surface as [`CoreError`].

pub mod error;
pub mod form;
pub mod list;
pub mod notice;

pub use error::CoreError;
pub use form::FeatureForm;
pub use list::{DEFAULT_PAGE_SIZE, FeatureList, FeatureTab};
pub use notice::{Notice, NoticeLevel};

// Re-export the domain model and client so UI crates depend on one crate.
pub use featctl_api::{
    Error as ApiError, Feature, FeatureId, FeaturePage, RegistryClient, TlsMode, TransportConfig,
};
