//! Enquiry form component.
//!
//! One component serves both the inline contact form and the project
//! enquiry modal; a `FormSpec` says which fields are required and how the
//! form is presented. Submission goes to whichever backends are configured:
//!
//! 1. trim every field and reject blanks (no network call);
//! 2. insert the row into the data store, if configured;
//! 3. send the fields through the email relay, if configured;
//! 4. with neither configured, succeed without doing anything.
//!
//! A failed email after a successful insert is reported as a failure and
//! the row is left in place.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::models::NewEnquiry;
use common::{AppError, AppResult, Backends};

/// How long the "thank you" overlay stays up before the form resets.
pub const SUCCESS_OVERLAY: Duration = Duration::from_secs(2);

/// Where the form is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Embedded in the contact section; always visible.
    Inline,
    /// Dialog with its own open/close lifecycle.
    Modal,
}

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    ProjectTitle,
    Message,
}

impl Field {
    /// Column / template parameter name.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::ProjectTitle => "project_title",
            Field::Message => "message",
        }
    }
}

/// Required fields plus presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSpec {
    pub presentation: Presentation,
    pub required: &'static [Field],
}

impl FormSpec {
    /// Contact-section form.
    pub const fn inline() -> Self {
        Self {
            presentation: Presentation::Inline,
            required: &[Field::Name, Field::Email, Field::Phone, Field::Message],
        }
    }

    /// Project enquiry dialog; also asks for a project title.
    pub const fn modal() -> Self {
        Self {
            presentation: Presentation::Modal,
            required: &[
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::ProjectTitle,
                Field::Message,
            ],
        }
    }

    pub fn requires(&self, field: Field) -> bool {
        self.required.contains(&field)
    }
}

/// Raw field values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, alias = "projectTitle")]
    pub project_title: String,
    #[serde(default)]
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::ProjectTitle => &self.project_title,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::ProjectTitle => &mut self.project_title,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    /// Overlay visible; fields reset once it times out.
    Success,
    /// Last attempt failed; fields kept for a retry.
    Failed(String),
}

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionReceipt {
    pub presentation: Presentation,
    /// Row inserted into the data store.
    pub stored: bool,
    /// Email sent through the relay.
    pub emailed: bool,
    /// No backend configured; nothing left the process.
    pub development_mode: bool,
    /// How long clients should show the success overlay.
    pub overlay_ms: u64,
}

/// Controlled enquiry form.
#[derive(Debug, Clone)]
pub struct EnquiryForm {
    spec: FormSpec,
    values: FormValues,
    status: FormStatus,
    open: bool,
}

impl EnquiryForm {
    pub fn new(spec: FormSpec) -> Self {
        Self {
            spec,
            values: FormValues::default(),
            status: FormStatus::Idle,
            open: spec.presentation == Presentation::Inline,
        }
    }

    /// Form pre-filled with submitted values (used by the HTTP handlers).
    pub fn with_values(spec: FormSpec, values: FormValues) -> Self {
        Self {
            values,
            ..Self::new(spec)
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shows the modal. Inline forms are always open.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the modal, keeping whatever was typed.
    pub fn close(&mut self) {
        if self.spec.presentation == Presentation::Modal {
            self.open = false;
        }
    }

    /// Controlled input change.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// Trims every field and checks the required ones.
    pub fn validate(&self) -> AppResult<NewEnquiry> {
        let missing: Vec<String> = self
            .spec
            .required
            .iter()
            .filter(|field| self.values.get(**field).trim().is_empty())
            .map(|field| field.key().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(missing));
        }

        let project_title = self.values.project_title.trim();
        Ok(NewEnquiry {
            name: self.values.name.trim().to_string(),
            email: self.values.email.trim().to_string(),
            phone: self.values.phone.trim().to_string(),
            project_title: (self.spec.requires(Field::ProjectTitle) || !project_title.is_empty())
                .then(|| project_title.to_string()),
            message: self.values.message.trim().to_string(),
        })
    }

    /// Validates and submits to the configured backends.
    ///
    /// On failure the status carries the message and the fields are left
    /// untouched.
    pub async fn submit(&mut self, backends: &Backends) -> AppResult<SubmissionReceipt> {
        let enquiry = match self.validate() {
            Ok(enquiry) => enquiry,
            Err(e) => {
                self.status = FormStatus::Failed(e.to_string());
                return Err(e);
            }
        };

        self.status = FormStatus::Submitting;
        match deliver(backends, &enquiry, self.spec.presentation).await {
            Ok(receipt) => {
                self.status = FormStatus::Success;
                Ok(receipt)
            }
            Err(e) => {
                self.status = FormStatus::Failed(format!("Failed to submit enquiry. {e}"));
                Err(e)
            }
        }
    }

    /// Holds the success overlay for `SUCCESS_OVERLAY`, then clears the
    /// fields, closes a modal and calls `on_complete` once.
    ///
    /// Does nothing unless the last submission succeeded.
    pub async fn finish_success<F: FnOnce()>(&mut self, on_complete: F) {
        if self.status != FormStatus::Success {
            return;
        }
        tokio::time::sleep(SUCCESS_OVERLAY).await;

        self.values = FormValues::default();
        self.status = FormStatus::Idle;
        self.close();
        on_complete();
    }
}

/// Sends one validated enquiry to the store and the relay, in that order.
async fn deliver(
    backends: &Backends,
    enquiry: &NewEnquiry,
    presentation: Presentation,
) -> AppResult<SubmissionReceipt> {
    let mut receipt = SubmissionReceipt {
        presentation,
        stored: false,
        emailed: false,
        development_mode: backends.is_development(),
        overlay_ms: SUCCESS_OVERLAY.as_millis() as u64,
    };

    if let Some(store) = &backends.store {
        store.insert_enquiry(enquiry).await.map_err(|e| {
            tracing::error!(error = %e, "failed to save enquiry");
            e
        })?;
        receipt.stored = true;
        tracing::info!(presentation = ?presentation, "enquiry saved");
    } else {
        tracing::debug!("data store not configured, skipping insert");
    }

    if let Some(email) = &backends.email {
        if let Err(e) = email.send_form(&enquiry.template_params()).await {
            tracing::warn!(stored = receipt.stored, error = %e, "enquiry email failed");
            return Err(e);
        }
        receipt.emailed = true;
    } else {
        tracing::debug!("email relay not configured, skipping send");
    }

    if receipt.development_mode {
        tracing::warn!(
            name = %enquiry.name,
            "enquiry accepted in development mode (no backend configured)"
        );
    }

    Ok(receipt)
}
