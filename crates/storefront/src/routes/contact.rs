//! Contact page and form submission.
//!
//! Submissions are validated and logged; there is no mail integration.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::validation::ValidationErrors;

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields and the email address.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_email("email", &self.email);
        errors.require("subject", &self.subject, "Subject is required");
        errors.require("message", &self.message, "Message is required");
        errors
    }
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "ValidationErrors::is_empty")]
    pub errors: ValidationErrors,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate;

/// Display the contact page.
#[instrument]
pub async fn show() -> ContactTemplate {
    ContactTemplate
}

/// Submit the contact form.
///
/// POST /contact
#[instrument(skip(form), fields(subject = %form.subject))]
pub async fn submit(Json(form): Json<ContactForm>) -> impl IntoResponse {
    let errors = form.validate();
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Please correct the highlighted fields.".to_string()),
                errors,
            }),
        );
    }

    add_breadcrumb("contact", "Contact form submitted", None);
    tracing::info!(
        email = %form.email.trim(),
        subject = %form.subject.trim(),
        message_len = form.message.trim().len(),
        "Contact form received"
    );

    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: Some("Thanks for reaching out. We'll reply within one business day.".to_string()),
            errors: ValidationErrors::new(),
        }),
    )
}
