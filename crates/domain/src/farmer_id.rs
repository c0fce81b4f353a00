use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{DomainError, Result};

static FARMER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})-(\d{2})-(\d{3})-(\d{2})-(\d{4})$").expect("valid regex")
});

const MAX_SEQUENCE: u32 = 9999;

/// Location codes a farmer is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationCodes {
    pub district: u32,
    pub mandal: u32,
    pub village: u32,
}

impl LocationCodes {
    pub fn new(district: u32, mandal: u32, village: u32) -> Result<Self> {
        if district > 99 || mandal > 99 || village > 999 {
            return Err(DomainError::InvalidFarmerId(format!(
                "location codes {district}/{mandal}/{village} exceed 2/2/3 digits"
            )));
        }
        Ok(Self {
            district,
            mandal,
            village,
        })
    }
}

/// Value object for the human-readable farmer identifier
///
/// Format: `DD-MM-VVV-YY-NNNN`
/// - district, mandal and village codes, zero padded
/// - two-digit registration year
/// - sequence within that location and year, starting at 0001
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FarmerId {
    value: String,
    codes: LocationCodes,
    year: u32,
    sequence: u32,
}

impl FarmerId {
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let value = id.into();
        let caps = FARMER_ID.captures(&value).ok_or_else(|| {
            DomainError::InvalidFarmerId(format!(
                "{value} does not match the DD-MM-VVV-YY-NNNN pattern"
            ))
        })?;

        // Every group is all digits with at most four of them
        let number = |i: usize| caps[i].parse::<u32>().unwrap_or_default();
        let codes = LocationCodes {
            district: number(1),
            mandal: number(2),
            village: number(3),
        };
        let (year, sequence) = (number(4), number(5));

        if sequence == 0 {
            return Err(DomainError::InvalidFarmerId(format!(
                "{value} has sequence 0000"
            )));
        }

        Ok(Self {
            value,
            codes,
            year,
            sequence,
        })
    }

    /// Shared prefix of every id issued at `codes` in `year`
    pub fn prefix(codes: LocationCodes, year: i32) -> String {
        format!(
            "{:02}-{:02}-{:03}-{:02}-",
            codes.district,
            codes.mandal,
            codes.village,
            year.rem_euclid(100)
        )
    }

    /// Next id at `codes` in `year`, one past the highest existing sequence
    pub fn next<'a>(
        codes: LocationCodes,
        year: i32,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let prefix = Self::prefix(codes, year);
        let highest = existing
            .into_iter()
            .filter_map(|id| Self::parse(id).ok())
            .filter(|id| id.value.starts_with(&prefix))
            .map(|id| id.sequence)
            .max()
            .unwrap_or(0);

        if highest >= MAX_SEQUENCE {
            return Err(DomainError::InvalidFarmerId(format!(
                "sequence exhausted for {prefix}"
            )));
        }

        Self::parse(format!("{prefix}{:04}", highest + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn codes(&self) -> LocationCodes {
        self.codes
    }

    /// Two-digit year
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl std::fmt::Display for FarmerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for FarmerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<FarmerId> for String {
    fn from(id: FarmerId) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warangal() -> LocationCodes {
        LocationCodes::new(7, 1, 1).unwrap()
    }

    #[test]
    fn test_first_id_at_location() {
        let id = FarmerId::next(warangal(), 2024, std::iter::empty()).unwrap();
        assert_eq!(id.as_str(), "07-01-001-24-0001");
        assert_eq!(id.sequence(), 1);
        assert_eq!(id.year(), 24);
    }

    #[test]
    fn test_sequence_follows_highest_at_same_prefix() {
        let existing = [
            "07-01-001-24-0001",
            "07-01-001-24-0007",
            "07-01-001-23-0042",
            "07-01-002-24-0100",
            "not-an-id",
        ];
        let id = FarmerId::next(warangal(), 2024, existing).unwrap();
        assert_eq!(id.as_str(), "07-01-001-24-0008");
    }

    #[test]
    fn test_sequence_exhausted() {
        let result = FarmerId::next(warangal(), 2024, ["07-01-001-24-9999"]);
        assert!(matches!(result, Err(DomainError::InvalidFarmerId(_))));
    }

    #[test]
    fn test_codes_out_of_range() {
        assert!(LocationCodes::new(100, 1, 1).is_err());
        assert!(LocationCodes::new(1, 1, 1000).is_err());
    }

    #[test]
    fn test_parse() {
        let id = FarmerId::parse("04-02-012-24-0003").unwrap();
        assert_eq!(id.codes(), LocationCodes::new(4, 2, 12).unwrap());
        assert!(FarmerId::parse("4-2-12-24-3").is_err());
        assert!(FarmerId::parse("04-02-012-24-0000").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = FarmerId::parse("04-02-012-24-0003").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"04-02-012-24-0003\"");
        let back: FarmerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<FarmerId>("\"bogus\"").is_err());
    }
}
