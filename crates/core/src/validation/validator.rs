//! Dispatch from [`FieldKind`] to its rule, plus batch validation.

use serde::Serialize;

use super::field::FieldKind;
use super::rules::{self, ValidationOutcome};

/// Disposable-mail domains rejected by default.
pub const DEFAULT_DISPOSABLE_EMAIL_DOMAINS: &[&str] = &[
    "tempmail.org",
    "guerrillamail.com",
    "10minutemail.com",
    "mailinator.com",
    "yopmail.com",
    "throwaway.email",
];

/// Business types accepted by default.
pub const DEFAULT_BUSINESS_TYPES: &[&str] = &[
    "Individual",
    "Partnership",
    "Company",
    "Proprietorship",
    "LLP",
    "HUF",
    "Society",
    "Trust",
    "Other",
];

/// Label used in address messages when no other label is supplied.
pub const DEFAULT_ADDRESS_LABEL: &str = "Address";

/// Static lists consulted by the email and business-type rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub disposable_email_domains: Vec<String>,
    pub business_types: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            disposable_email_domains: to_owned_list(DEFAULT_DISPOSABLE_EMAIL_DOMAINS),
            business_types: to_owned_list(DEFAULT_BUSINESS_TYPES),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

type Rule = fn(&ValidatorConfig, &str) -> ValidationOutcome;

/// The one place that maps a kind to its rule.
fn rule_for(kind: FieldKind) -> Rule {
    match kind {
        FieldKind::Aadhaar => |_, v| rules::validate_aadhaar(v),
        FieldKind::Pan => |_, v| rules::validate_pan(v),
        FieldKind::Mobile => |_, v| rules::validate_mobile(v),
        FieldKind::Email => |cfg, v| rules::validate_email(v, &cfg.disposable_email_domains),
        FieldKind::Pincode => |_, v| rules::validate_pincode(v),
        FieldKind::BusinessName => |_, v| rules::validate_business_name(v),
        FieldKind::BusinessType => |cfg, v| rules::validate_business_type(v, &cfg.business_types),
        FieldKind::Address => |_, v| rules::validate_address(v, DEFAULT_ADDRESS_LABEL),
        FieldKind::City => |_, v| rules::validate_city(v),
        FieldKind::State => |_, v| rules::validate_state(v),
        FieldKind::Otp => |_, v| rules::validate_otp(v),
    }
}

/// Result of validating several fields together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// One outcome per input, in input order.
    pub outcomes: Vec<ValidationOutcome>,
    /// True iff every outcome is valid (vacuously true for an empty batch).
    pub all_valid: bool,
}

/// Stateless validator bound to a [`ValidatorConfig`].
///
/// Cheap to share behind an `Arc`; every method takes `&self` and performs
/// no I/O.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    config: ValidatorConfig,
}

impl FieldValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate(&self, kind: FieldKind, raw: &str) -> ValidationOutcome {
        rule_for(kind)(&self.config, raw)
    }

    /// Address validation with a caller-chosen label, e.g. `"Address line 1"`.
    pub fn validate_address_as(&self, raw: &str, label: &str) -> ValidationOutcome {
        rules::validate_address(raw, label)
    }

    pub fn validate_batch<'a, I>(&self, fields: I) -> BatchOutcome
    where
        I: IntoIterator<Item = (FieldKind, &'a str)>,
    {
        let outcomes: Vec<ValidationOutcome> = fields
            .into_iter()
            .map(|(kind, raw)| self.validate(kind, raw))
            .collect();
        let all_valid = outcomes.iter().all(ValidationOutcome::is_valid);
        BatchOutcome {
            outcomes,
            all_valid,
        }
    }
}
