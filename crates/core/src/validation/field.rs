//! The closed set of validated form fields.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A form field subject to a specific validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Aadhaar,
    Pan,
    Mobile,
    Email,
    Pincode,
    BusinessName,
    BusinessType,
    Address,
    City,
    State,
    Otp,
}

/// Returned when a caller names a field outside [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FieldKind {
    pub const ALL: [FieldKind; 11] = [
        FieldKind::Aadhaar,
        FieldKind::Pan,
        FieldKind::Mobile,
        FieldKind::Email,
        FieldKind::Pincode,
        FieldKind::BusinessName,
        FieldKind::BusinessType,
        FieldKind::Address,
        FieldKind::City,
        FieldKind::State,
        FieldKind::Otp,
    ];

    /// Category label written to the validation log.
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Aadhaar => "aadhaar",
            FieldKind::Pan => "pan",
            FieldKind::Mobile => "mobile",
            FieldKind::Email => "email",
            FieldKind::Pincode => "pincode",
            FieldKind::BusinessName => "business_name",
            FieldKind::BusinessType => "business_type",
            FieldKind::Address => "address",
            FieldKind::City => "city",
            FieldKind::State => "state",
            FieldKind::Otp => "otp",
        }
    }

    /// Apply this field's normalization step to a raw value.
    ///
    /// | Kind | Normalization |
    /// |------|---------------|
    /// | Aadhaar | strip whitespace and hyphens |
    /// | PAN | strip whitespace, uppercase |
    /// | Mobile | strip whitespace and hyphens, then one leading `+` |
    /// | Pincode, OTP | strip whitespace |
    /// | Business name, address, city, state | trim |
    /// | Email, business type | unchanged |
    pub fn normalize(self, raw: &str) -> String {
        match self {
            FieldKind::Aadhaar => strip(raw, |c| c.is_whitespace() || c == '-'),
            FieldKind::Pan => strip(raw, char::is_whitespace).to_uppercase(),
            FieldKind::Mobile => {
                let clean = strip(raw, |c| c.is_whitespace() || c == '-');
                match clean.strip_prefix('+') {
                    Some(rest) => rest.to_string(),
                    None => clean,
                }
            }
            FieldKind::Pincode | FieldKind::Otp => strip(raw, char::is_whitespace),
            FieldKind::BusinessName | FieldKind::Address | FieldKind::City | FieldKind::State => {
                raw.trim().to_string()
            }
            FieldKind::Email | FieldKind::BusinessType => raw.to_string(),
        }
    }
}

fn strip(raw: &str, drop: impl Fn(char) -> bool) -> String {
    raw.chars().filter(|&c| !drop(c)).collect()
}

impl FromStr for FieldKind {
    type Err = UnknownField;

    /// Map a request field name to its kind, ignoring case.
    ///
    /// Accepts the form's field names (`aadhaarNumber`, `panNumber`, ...)
    /// as well as the log labels (`aadhaar`, `business_name`, ...).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "aadhaarnumber" | "aadhaar" => FieldKind::Aadhaar,
            "pannumber" | "pan" => FieldKind::Pan,
            "mobilenumber" | "mobile" => FieldKind::Mobile,
            "emailaddress" | "email" => FieldKind::Email,
            "pincode" => FieldKind::Pincode,
            "businessname" | "business_name" => FieldKind::BusinessName,
            "businesstype" | "business_type" => FieldKind::BusinessType,
            "addressline1" | "address" => FieldKind::Address,
            "city" => FieldKind::City,
            "state" => FieldKind::State,
            "otp" => FieldKind::Otp,
            _ => return Err(UnknownField(name.to_string())),
        };
        Ok(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
