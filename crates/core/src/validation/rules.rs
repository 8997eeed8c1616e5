//! Field rules: pure logic, no I/O.
//!
//! Every rule follows the same order: reject an empty value, normalize,
//! check the format, then apply plausibility checks. The first violated
//! rule determines the message.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::field::FieldKind;

/// Length of the ascending digit run that makes an Aadhaar number implausible.
pub const ASCENDING_RUN_LEN: usize = 3;

static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static BUSINESS_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s.,\-&()]+$").expect("valid regex"));

static PLACE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s.]+$").expect("valid regex"));

/// Pass/fail verdict of a single validation call.
///
/// `error_message` is present exactly when `is_valid` is false. The fields
/// are private so that invariant cannot be broken after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn all_identical(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// True when `digits` contains `run` consecutive digits, each exactly one
/// greater than the one before it (`123`, `789`).
fn has_ascending_run(digits: &[u8], run: usize) -> bool {
    digits
        .windows(run)
        .any(|w| w.windows(2).all(|pair| pair[1] == pair[0] + 1))
}

pub fn validate_aadhaar(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("Aadhaar number is required");
    }
    let clean = FieldKind::Aadhaar.normalize(raw);
    if !is_digits(&clean, 12) {
        return ValidationOutcome::invalid("Aadhaar number must be exactly 12 digits");
    }
    if all_identical(&clean) {
        return ValidationOutcome::invalid("Invalid Aadhaar number");
    }
    let digits: Vec<u8> = clean.bytes().map(|b| b - b'0').collect();
    if digits[0] <= 1 || has_ascending_run(&digits, ASCENDING_RUN_LEN) {
        return ValidationOutcome::invalid("Invalid Aadhaar number checksum");
    }
    ValidationOutcome::valid()
}

pub fn validate_pan(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("PAN number is required");
    }
    let clean = FieldKind::Pan.normalize(raw);
    if !PAN_RE.is_match(&clean) {
        return ValidationOutcome::invalid(
            "PAN must be in format: ABCDE1234F (5 letters + 4 digits + 1 letter)",
        );
    }
    if all_identical(&clean) {
        return ValidationOutcome::invalid("Invalid PAN number");
    }
    ValidationOutcome::valid()
}

pub fn validate_mobile(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("Mobile number is required");
    }
    let clean = FieldKind::Mobile.normalize(raw);
    let starts_ok = matches!(clean.as_bytes().first(), Some(b'6'..=b'9'));
    if !is_digits(&clean, 10) || !starts_ok {
        return ValidationOutcome::invalid(
            "Mobile number must be 10 digits starting with 6, 7, 8, or 9",
        );
    }
    ValidationOutcome::valid()
}

/// Validate an email address, rejecting any domain on `disposable_domains`.
///
/// The blocklist is compared case-insensitively.
pub fn validate_email(raw: &str, disposable_domains: &[String]) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("Email address is required");
    }
    if !EMAIL_RE.is_match(raw) {
        return ValidationOutcome::invalid("Please enter a valid email address");
    }
    let domain = raw.split_once('@').map(|(_, domain)| domain).unwrap_or_default();
    if disposable_domains
        .iter()
        .any(|blocked| blocked.eq_ignore_ascii_case(domain))
    {
        return ValidationOutcome::invalid("Disposable email addresses are not allowed");
    }
    ValidationOutcome::valid()
}

pub fn validate_pincode(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("PIN code is required");
    }
    let clean = FieldKind::Pincode.normalize(raw);
    if !is_digits(&clean, 6) {
        return ValidationOutcome::invalid("PIN code must be exactly 6 digits");
    }
    if all_identical(&clean) {
        return ValidationOutcome::invalid("Invalid PIN code");
    }
    ValidationOutcome::valid()
}

pub fn validate_business_name(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("Business name is required");
    }
    let clean = FieldKind::BusinessName.normalize(raw);
    let len = clean.chars().count();
    if len < 2 {
        return ValidationOutcome::invalid("Business name must be at least 2 characters long");
    }
    if len > 100 {
        return ValidationOutcome::invalid("Business name must be less than 100 characters");
    }
    if !BUSINESS_NAME_RE.is_match(&clean) {
        return ValidationOutcome::invalid("Business name contains invalid characters");
    }
    ValidationOutcome::valid()
}

/// Exact, case-sensitive match against the closed list of business types.
pub fn validate_business_type(raw: &str, allowed: &[String]) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("Business type is required");
    }
    if !allowed.iter().any(|t| t == raw) {
        return ValidationOutcome::invalid(format!(
            "Business type must be one of: {}",
            allowed.join(", ")
        ));
    }
    ValidationOutcome::valid()
}

/// Validate an address line. `label` names the field in messages
/// (`"Address"` for the generic field, `"Address line 1"` on the form).
pub fn validate_address(raw: &str, label: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid(format!("{label} is required"));
    }
    let clean = FieldKind::Address.normalize(raw);
    let len = clean.chars().count();
    if len < 5 {
        return ValidationOutcome::invalid(format!("{label} must be at least 5 characters long"));
    }
    if len > 200 {
        return ValidationOutcome::invalid(format!("{label} must be less than 200 characters"));
    }
    ValidationOutcome::valid()
}

fn validate_place_name(raw: &str, kind: FieldKind, noun: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid(format!("{noun} is required"));
    }
    let clean = kind.normalize(raw);
    let len = clean.chars().count();
    if len < 2 {
        return ValidationOutcome::invalid(format!(
            "{noun} name must be at least 2 characters long"
        ));
    }
    if len > 50 {
        return ValidationOutcome::invalid(format!("{noun} name must be less than 50 characters"));
    }
    if !PLACE_NAME_RE.is_match(&clean) {
        return ValidationOutcome::invalid(format!("{noun} name contains invalid characters"));
    }
    ValidationOutcome::valid()
}

pub fn validate_city(raw: &str) -> ValidationOutcome {
    validate_place_name(raw, FieldKind::City, "City")
}

pub fn validate_state(raw: &str) -> ValidationOutcome {
    validate_place_name(raw, FieldKind::State, "State")
}

pub fn validate_otp(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid("OTP is required");
    }
    let clean = FieldKind::Otp.normalize(raw);
    if !is_digits(&clean, 6) {
        return ValidationOutcome::invalid("OTP must be exactly 6 digits");
    }
    ValidationOutcome::valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(outcome: &ValidationOutcome) -> &str {
        outcome.error_message().expect("outcome should be invalid")
    }

    fn disposable() -> Vec<String> {
        ["mailinator.com", "yopmail.com", "tempmail.org"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    // -- Outcome invariant --

    #[test]
    fn valid_outcome_has_no_message() {
        let outcome = ValidationOutcome::valid();
        assert!(outcome.is_valid());
        assert!(outcome.error_message().is_none());
    }

    #[test]
    fn invalid_outcome_carries_message() {
        let outcome = ValidationOutcome::invalid("nope");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.error_message(), Some("nope"));
    }

    // -- Aadhaar --

    #[test]
    fn aadhaar_accepts_plausible_number() {
        assert!(validate_aadhaar("297418536029").is_valid());
    }

    #[test]
    fn aadhaar_strips_spaces_and_hyphens() {
        assert!(validate_aadhaar("2974 1853 6029").is_valid());
        assert!(validate_aadhaar("2974-1853-6029").is_valid());
    }

    #[test]
    fn aadhaar_empty_is_required() {
        assert_eq!(message(&validate_aadhaar("")), "Aadhaar number is required");
    }

    #[test]
    fn aadhaar_wrong_length() {
        assert_eq!(
            message(&validate_aadhaar("29741853602")),
            "Aadhaar number must be exactly 12 digits"
        );
        assert_eq!(
            message(&validate_aadhaar("29741853602a")),
            "Aadhaar number must be exactly 12 digits"
        );
    }

    #[test]
    fn aadhaar_all_identical_digits() {
        assert_eq!(message(&validate_aadhaar("111111111111")), "Invalid Aadhaar number");
        assert_eq!(message(&validate_aadhaar("999999999999")), "Invalid Aadhaar number");
    }

    #[test]
    fn aadhaar_leading_zero_or_one() {
        assert_eq!(
            message(&validate_aadhaar("097418536029")),
            "Invalid Aadhaar number checksum"
        );
        assert_eq!(
            message(&validate_aadhaar("197418536029")),
            "Invalid Aadhaar number checksum"
        );
    }

    #[test]
    fn aadhaar_ascending_run_of_three() {
        // "123" in the middle.
        assert_eq!(
            message(&validate_aadhaar("297412353602")),
            "Invalid Aadhaar number checksum"
        );
        // "789" at the end.
        assert_eq!(
            message(&validate_aadhaar("297418530789")),
            "Invalid Aadhaar number checksum"
        );
    }

    #[test]
    fn aadhaar_ascending_pair_is_allowed() {
        // "12" followed by 8 is not a run of three.
        assert!(validate_aadhaar("297412853602").is_valid());
    }

    #[test]
    fn aadhaar_descending_run_is_allowed() {
        assert!(validate_aadhaar("987654321098").is_valid());
    }

    #[test]
    fn ascending_run_detection() {
        assert!(has_ascending_run(&[4, 5, 6], 3));
        assert!(!has_ascending_run(&[4, 5, 7], 3));
        assert!(!has_ascending_run(&[1, 3, 5], 3));
        assert!(!has_ascending_run(&[1, 2], 3));
    }

    // -- PAN --

    #[test]
    fn pan_accepts_canonical_format() {
        assert!(validate_pan("ABCDE1234F").is_valid());
    }

    #[test]
    fn pan_is_case_normalized() {
        assert!(validate_pan("abcde1234f").is_valid());
        assert!(validate_pan("ABCDE 1234 F").is_valid());
    }

    #[test]
    fn pan_rejects_bad_shape() {
        let expected = "PAN must be in format: ABCDE1234F (5 letters + 4 digits + 1 letter)";
        assert_eq!(message(&validate_pan("ABCD12345F")), expected);
        assert_eq!(message(&validate_pan("ABCDE1234")), expected);
        assert_eq!(message(&validate_pan("ABCDE12345")), expected);
    }

    #[test]
    fn pan_mixed_repeats_are_not_all_identical() {
        // Letters and digits differ, so the all-identical rule never fires here.
        assert!(validate_pan("AAAAA0000A").is_valid());
    }

    #[test]
    fn pan_empty_is_required() {
        assert_eq!(message(&validate_pan("")), "PAN number is required");
    }

    // -- Mobile --

    #[test]
    fn mobile_accepts_indian_number() {
        assert!(validate_mobile("9876543210").is_valid());
        assert!(validate_mobile("98765-43210").is_valid());
        assert!(validate_mobile("+9876543210").is_valid());
    }

    #[test]
    fn mobile_rejects_bad_leading_digit() {
        assert_eq!(
            message(&validate_mobile("5876543210")),
            "Mobile number must be 10 digits starting with 6, 7, 8, or 9"
        );
    }

    #[test]
    fn mobile_rejects_country_code_prefix() {
        assert!(!validate_mobile("+91 98765 43210").is_valid());
    }

    #[test]
    fn mobile_empty_is_required() {
        assert_eq!(message(&validate_mobile("")), "Mobile number is required");
    }

    // -- Email --

    #[test]
    fn email_accepts_regular_address() {
        assert!(validate_email("user@example.com", &disposable()).is_valid());
        assert!(validate_email("first.last+tag@mail.example.co.in", &disposable()).is_valid());
    }

    #[test]
    fn email_rejects_disposable_domain() {
        assert_eq!(
            message(&validate_email("user@mailinator.com", &disposable())),
            "Disposable email addresses are not allowed"
        );
    }

    #[test]
    fn email_disposable_match_is_case_insensitive() {
        assert!(!validate_email("user@MAILINATOR.COM", &disposable()).is_valid());
    }

    #[test]
    fn email_rejects_malformed_address() {
        for bad in ["user", "user@", "@example.com", "user@example", "user@example.c"] {
            assert_eq!(
                message(&validate_email(bad, &disposable())),
                "Please enter a valid email address",
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn email_empty_blocklist_allows_everything_well_formed() {
        assert!(validate_email("user@mailinator.com", &[]).is_valid());
    }

    // -- Pincode --

    #[test]
    fn pincode_accepts_six_digits() {
        assert!(validate_pincode("110001").is_valid());
        assert!(validate_pincode("110 001").is_valid());
    }

    #[test]
    fn pincode_rejects_identical_digits() {
        assert_eq!(message(&validate_pincode("000000")), "Invalid PIN code");
    }

    #[test]
    fn pincode_rejects_wrong_length() {
        assert_eq!(
            message(&validate_pincode("11001")),
            "PIN code must be exactly 6 digits"
        );
    }

    // -- Business name --

    #[test]
    fn business_name_accepts_punctuation() {
        assert!(validate_business_name("Sharma & Sons (P) Ltd., Unit-2").is_valid());
    }

    #[test]
    fn business_name_length_bounds() {
        assert_eq!(
            message(&validate_business_name(" A ")),
            "Business name must be at least 2 characters long"
        );
        assert!(validate_business_name(&"A".repeat(100)).is_valid());
        assert_eq!(
            message(&validate_business_name(&"A".repeat(101))),
            "Business name must be less than 100 characters"
        );
    }

    #[test]
    fn business_name_rejects_symbols() {
        assert_eq!(
            message(&validate_business_name("Acme @ Home")),
            "Business name contains invalid characters"
        );
    }

    // -- Business type --

    #[test]
    fn business_type_exact_match_only() {
        let allowed: Vec<String> = vec!["Company".into(), "LLP".into()];
        assert!(validate_business_type("LLP", &allowed).is_valid());
        assert_eq!(
            message(&validate_business_type("llp", &allowed)),
            "Business type must be one of: Company, LLP"
        );
    }

    // -- Address --

    #[test]
    fn address_uses_label_in_messages() {
        assert_eq!(
            message(&validate_address("", "Address line 1")),
            "Address line 1 is required"
        );
        assert_eq!(
            message(&validate_address("  ab  ", "Address")),
            "Address must be at least 5 characters long"
        );
        assert_eq!(
            message(&validate_address(&"x".repeat(201), "Address")),
            "Address must be less than 200 characters"
        );
        assert!(validate_address("12 MG Road", "Address").is_valid());
    }

    // -- City / State --

    #[test]
    fn city_and_state_rules() {
        assert!(validate_city("New Delhi").is_valid());
        assert!(validate_city("St. Thomas Mount").is_valid());
        assert_eq!(message(&validate_city("")), "City is required");
        assert_eq!(
            message(&validate_city("N")),
            "City name must be at least 2 characters long"
        );
        assert_eq!(
            message(&validate_city("Delhi-6")),
            "City name contains invalid characters"
        );
        assert!(validate_state("Tamil Nadu").is_valid());
        assert_eq!(
            message(&validate_state(&"a".repeat(51))),
            "State name must be less than 50 characters"
        );
    }

    // -- OTP --

    #[test]
    fn otp_rules() {
        assert!(validate_otp("123456").is_valid());
        assert!(validate_otp("123 456").is_valid());
        assert_eq!(message(&validate_otp("")), "OTP is required");
        assert_eq!(message(&validate_otp("12345")), "OTP must be exactly 6 digits");
    }

    // -- Purity --

    #[test]
    fn repeated_calls_are_identical() {
        for raw in ["297418536029", "111111111111", "", "abc"] {
            assert_eq!(validate_aadhaar(raw), validate_aadhaar(raw));
        }
        assert_eq!(validate_pan("abcde1234f"), validate_pan("abcde1234f"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Independent statement of the Aadhaar rule for 12-digit strings.
    fn aadhaar_plausible(digits: &str) -> bool {
        let b = digits.as_bytes();
        let all_same = b.iter().all(|&d| d == b[0]);
        let ascending = b
            .windows(3)
            .any(|w| w[1] == w[0] + 1 && w[2] == w[1] + 1);
        b[0] >= b'2' && !all_same && !ascending
    }

    /// Digits interleaved with the separators users type.
    fn separated(digits: &str, seps: &[&str]) -> String {
        digits
            .chars()
            .zip(seps.iter().cycle())
            .map(|(d, sep)| format!("{d}{sep}"))
            .collect()
    }

    proptest! {
        /// Every 12-digit string is accepted exactly when it is plausible.
        #[test]
        fn aadhaar_matches_rule_for_all_twelve_digit_strings(digits in "[0-9]{12}") {
            let outcome = validate_aadhaar(&digits);
            prop_assert_eq!(outcome.is_valid(), aadhaar_plausible(&digits), "input {}", digits);
        }

        /// Plausible numbers built from scratch always pass.
        #[test]
        fn aadhaar_accepts_generated_plausible_numbers(
            first in 2u8..=9,
            rest in proptest::collection::vec(0u8..=9, 11),
        ) {
            let digits: String = std::iter::once(first)
                .chain(rest)
                .map(|d| char::from(b'0' + d))
                .collect();
            prop_assume!(aadhaar_plausible(&digits));
            prop_assert!(validate_aadhaar(&digits).is_valid());
        }

        /// Spaces and hyphens between digits never change the outcome.
        #[test]
        fn aadhaar_ignores_separators(
            digits in "[0-9]{12}",
            seps in proptest::collection::vec(prop_oneof![Just(""), Just(" "), Just("-")], 1..4),
        ) {
            let spaced = separated(&digits, &seps);
            prop_assert_eq!(validate_aadhaar(&spaced), validate_aadhaar(&digits));
        }

        /// Ten digits starting with 6-9 is the whole mobile rule.
        #[test]
        fn mobile_accepts_exactly_ten_digits_starting_six_to_nine(digits in "[0-9]{10}") {
            let expected = matches!(digits.as_bytes()[0], b'6'..=b'9');
            prop_assert_eq!(validate_mobile(&digits).is_valid(), expected);
        }

        /// PAN case does not matter.
        #[test]
        fn pan_outcome_ignores_case(pan in "[A-Za-z]{5}[0-9]{4}[A-Za-z]") {
            prop_assert_eq!(validate_pan(&pan), validate_pan(&pan.to_uppercase()));
            prop_assert!(validate_pan(&pan).is_valid());
        }
    }
}

