//! Registration form rules and submission lifecycle status.
//!
//! The form is checked field-by-field with the shared [`FieldValidator`];
//! there is no cross-field validation beyond the OTP gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{FieldKind, FieldValidator, ValidationOutcome};

/// Label used for the first address line in form messages.
pub const ADDRESS_LINE1_LABEL: &str = "Address line 1";

/// Review state of a stored submission.
///
/// `Rejected` submissions are superseded: they no longer block a new
/// submission with the same Aadhaar or PAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    UnderReview,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Pending,
        SubmissionStatus::Approved,
        SubmissionStatus::Rejected,
        SubmissionStatus::UnderReview,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "PENDING",
            SubmissionStatus::Approved => "APPROVED",
            SubmissionStatus::Rejected => "REJECTED",
            SubmissionStatus::UnderReview => "UNDER_REVIEW",
        }
    }

    pub fn is_superseded(self) -> bool {
        self == SubmissionStatus::Rejected
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid status: {s}")))
    }
}

impl TryFrom<String> for SubmissionStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The registration form as submitted by the client.
///
/// Missing text fields deserialize as empty strings so they surface as
/// required-field errors rather than as malformed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub aadhaar_number: String,
    pub mobile_number: String,
    pub email_address: String,
    pub otp_verified: bool,
    pub pan_number: String,
    pub business_name: String,
    pub business_type: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl SubmissionForm {
    /// Copy of the form with every field normalized for storage.
    pub fn normalized(&self) -> SubmissionForm {
        SubmissionForm {
            aadhaar_number: FieldKind::Aadhaar.normalize(&self.aadhaar_number),
            mobile_number: FieldKind::Mobile.normalize(&self.mobile_number),
            email_address: self.email_address.trim().to_string(),
            otp_verified: self.otp_verified,
            pan_number: FieldKind::Pan.normalize(&self.pan_number),
            business_name: FieldKind::BusinessName.normalize(&self.business_name),
            business_type: FieldKind::BusinessType.normalize(&self.business_type),
            address_line1: FieldKind::Address.normalize(&self.address_line1),
            address_line2: self
                .address_line2
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            city: FieldKind::City.normalize(&self.city),
            state: FieldKind::State.normalize(&self.state),
            pincode: FieldKind::Pincode.normalize(&self.pincode),
        }
    }
}

/// A failed field on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: &'static str,
    pub kind: FieldKind,
    /// The value exactly as submitted.
    pub value: String,
    pub outcome: ValidationOutcome,
}

/// Why a form was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormRejection {
    #[error("OTP verification is required before form submission")]
    OtpNotVerified,

    #[error("Form validation failed")]
    InvalidFields(Vec<FieldError>),
}

/// Validate every field of `form` in a fixed order.
///
/// The OTP gate is checked first. On success the per-field checks are
/// returned so the caller can record them.
pub fn validate_form(
    validator: &FieldValidator,
    form: &SubmissionForm,
) -> Result<Vec<FieldCheck>, FormRejection> {
    let check = |field: &'static str, kind: FieldKind, value: &str| FieldCheck {
        field,
        kind,
        value: value.to_string(),
        outcome: validator.validate(kind, value),
    };

    let checks = vec![
        check("aadhaar_number", FieldKind::Aadhaar, &form.aadhaar_number),
        check("mobile_number", FieldKind::Mobile, &form.mobile_number),
        check("email_address", FieldKind::Email, &form.email_address),
        check("pan_number", FieldKind::Pan, &form.pan_number),
        check("business_name", FieldKind::BusinessName, &form.business_name),
        check("business_type", FieldKind::BusinessType, &form.business_type),
        FieldCheck {
            field: "address_line1",
            kind: FieldKind::Address,
            value: form.address_line1.clone(),
            outcome: validator.validate_address_as(&form.address_line1, ADDRESS_LINE1_LABEL),
        },
        check("city", FieldKind::City, &form.city),
        check("state", FieldKind::State, &form.state),
        check("pincode", FieldKind::Pincode, &form.pincode),
    ];

    if !form.otp_verified {
        return Err(FormRejection::OtpNotVerified);
    }

    let errors: Vec<FieldError> = checks
        .iter()
        .filter_map(|c| {
            c.outcome.error_message().map(|message| FieldError {
                field: c.field.to_string(),
                message: message.to_string(),
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(checks)
    } else {
        Err(FormRejection::InvalidFields(errors))
    }
}
