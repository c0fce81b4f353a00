use regex::Regex;
use std::sync::LazyLock;

use crate::record::EntityKind;

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("valid regex"));
static IFSC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid regex"));
static AADHAAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid regex"));
static ACCOUNT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{9,18}$").expect("valid regex"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Input widget and format rule of a form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    /// Non-negative whole number
    Number,
    /// Strictly positive decimal
    Decimal,
    Email,
    /// Indian mobile: 10 digits starting with 6-9
    Mobile,
    /// Bank IFSC: 4 letters, a zero, 6 alphanumerics
    Ifsc,
    /// 12-digit Aadhaar number
    Aadhaar,
    AccountNumber,
    Select(&'static [&'static str]),
    /// Foreign key into another entity store
    Reference(EntityKind),
}

impl FieldKind {
    /// Check a non-blank raw value; the error is completed with the field label
    pub fn check(&self, label: &str, raw: &str) -> Result<(), String> {
        let ok = match self {
            Self::Text | Self::Reference(_) => true,
            Self::Number => raw.parse::<u64>().is_ok(),
            Self::Decimal => raw
                .parse::<f64>()
                .map(|v| v.is_finite() && v > 0.0)
                .unwrap_or(false),
            Self::Email => EMAIL.is_match(raw),
            Self::Mobile => MOBILE.is_match(raw),
            Self::Ifsc => IFSC.is_match(raw),
            Self::Aadhaar => AADHAAR.is_match(raw),
            Self::AccountNumber => ACCOUNT_NUMBER.is_match(raw),
            Self::Select(options) => options.iter().any(|o| o.eq_ignore_ascii_case(raw)),
        };

        if ok {
            Ok(())
        } else {
            Err(self.format_message(label))
        }
    }

    fn format_message(&self, label: &str) -> String {
        match self {
            Self::Text | Self::Reference(_) => format!("{label} is invalid"),
            Self::Number => format!("{label} must be a whole number"),
            Self::Decimal => format!("{label} must be a positive number"),
            Self::Email => format!("{label} must be a valid email address"),
            Self::Mobile => format!("{label} must be a valid 10-digit Indian mobile number"),
            Self::Ifsc => format!("{label} must be a valid IFSC code (e.g. SBIN0001234)"),
            Self::Aadhaar => format!("{label} must be a 12-digit Aadhaar number"),
            Self::AccountNumber => format!("{label} must be 9 to 18 digits"),
            Self::Select(options) => format!("{label} must be one of: {}", options.join(", ")),
        }
    }
}
