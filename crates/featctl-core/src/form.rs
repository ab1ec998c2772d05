//! Feature form controller — create and edit a single record.
//!
//! Pre-populates once from an existing record, never re-syncs if that
//! record changes later. Submission branches create-vs-update on the
//! presence of an id, and an empty name is rejected client-side before
//! any request is made.

use tracing::warn;

use featctl_api::{Error as ApiError, Feature, FeatureId, RegistryClient};

use crate::error::CoreError;
use crate::notice::Notice;

/// View state for the feature create/edit form.
pub struct FeatureForm {
    draft: Feature,
    existing_id: Option<FeatureId>,
    read_only: bool,
    submitting: bool,
    navigate_away: bool,
    notices: Vec<Notice>,
    last_error: Option<ApiError>,
}

impl Default for FeatureForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureForm {
    /// A blank create form.
    pub fn new() -> Self {
        Self {
            draft: Feature::named(""),
            existing_id: None,
            read_only: false,
            submitting: false,
            navigate_away: false,
            notices: Vec::new(),
            last_error: None,
        }
    }

    /// An edit (or read-only view) form pre-populated from `existing`.
    ///
    /// Fields are copied once, here; later changes to the source record
    /// are not re-synced into the form.
    pub fn from_existing(existing: &Feature, read_only: bool) -> Self {
        Self {
            draft: existing.clone(),
            existing_id: existing.id.clone(),
            read_only,
            submitting: false,
            navigate_away: false,
            notices: Vec::new(),
            last_error: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The current field values.
    pub fn draft(&self) -> &Feature {
        &self.draft
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// `true` while a submit is in flight (submit control disabled).
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Set after a successful submit; the UI should leave the form.
    pub fn should_navigate_away(&self) -> bool {
        self.navigate_away
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Take the structured error from the last submit, if it failed.
    /// The notice carries the user-facing text; this keeps the typed
    /// error for callers that route failures by kind.
    pub fn take_last_error(&mut self) -> Option<ApiError> {
        self.last_error.take()
    }

    // ── Field setters ────────────────────────────────────────────────
    //
    // All fields are disabled in read-only mode, independent of
    // submission state, so edits are ignored rather than applied.

    pub fn set_name(&mut self, value: impl Into<String>) {
        if !self.read_only {
            self.draft.name = value.into();
        }
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        if !self.read_only {
            self.draft.description = Some(value.into());
        }
    }

    pub fn set_status(&mut self, value: impl Into<String>) {
        if !self.read_only {
            self.draft.status = value.into();
        }
    }

    pub fn set_feature_type(&mut self, value: impl Into<String>) {
        if !self.read_only {
            self.draft.feature_type = value.into();
        }
    }

    pub fn set_data_source(&mut self, value: impl Into<String>) {
        if !self.read_only {
            self.draft.data_source = value.into();
        }
    }

    pub fn set_owners(&mut self, value: impl Into<String>) {
        if !self.read_only {
            self.draft.owners = value.into();
        }
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Submit the form: create when the record has never been
    /// persisted, update otherwise.
    ///
    /// Validation failures return `Err` before any network call and are
    /// meant for inline display next to the field. Network outcomes
    /// become notices: success sets the navigate-away flag, failure
    /// carries the response body and keeps the user on the form.
    pub async fn submit(&mut self, client: &RegistryClient) -> Result<(), CoreError> {
        if self.submitting || self.read_only {
            return Ok(());
        }
        self.validate()?;

        self.submitting = true;
        let outcome = match &self.existing_id {
            Some(id) => client.update(&self.draft, id).await,
            None => client.create(&self.draft).await,
        };

        match outcome {
            Ok(saved) => {
                let message = if self.existing_id.is_some() {
                    "Feature is updated successfully"
                } else {
                    "New feature created"
                };
                self.existing_id.clone_from(&saved.id);
                self.draft = saved;
                self.notices.push(Notice::success(message));
                self.navigate_away = true;
                self.last_error = None;
            }
            Err(err) => {
                warn!(%err, "feature submit failed");
                self.notices.push(Notice::error(submit_error_message(&err)));
                self.last_error = Some(err);
            }
        }
        self.submitting = false;
        Ok(())
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.draft.name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "name".into(),
                reason: "Name is required".into(),
            });
        }
        Ok(())
    }
}

/// The registry explains rejections in the response body; show that
/// text to the user when we have it.
fn submit_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Api { body, .. } if !body.is_empty() => body.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_existing_copies_fields_once() {
        let mut source = Feature {
            id: Some(FeatureId::from("f-1")),
            status: "active".into(),
            ..Feature::named("trips_count")
        };
        let form = FeatureForm::from_existing(&source, false);

        // Mutating the source after construction must not re-sync.
        source.name = "renamed".into();
        assert_eq!(form.draft().name, "trips_count");
        assert_eq!(form.draft().status, "active");
    }

    #[test]
    fn read_only_ignores_edits() {
        let source = Feature {
            id: Some(FeatureId::from("f-1")),
            ..Feature::named("trips_count")
        };
        let mut form = FeatureForm::from_existing(&source, true);

        form.set_name("sneaky rename");
        form.set_owners("mallory");

        assert_eq!(form.draft().name, "trips_count");
        assert_eq!(form.draft().owners, "");
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut form = FeatureForm::new();
        form.set_name("   ");
        assert!(matches!(
            form.validate(),
            Err(CoreError::Validation { ref field, .. }) if field == "name"
        ));
    }

    #[test]
    fn submit_error_message_prefers_body() {
        let api = ApiError::Api {
            status: 409,
            body: "duplicate feature name".into(),
        };
        assert_eq!(submit_error_message(&api), "duplicate feature name");
    }
}
