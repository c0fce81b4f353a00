use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Binary lifecycle used by master data, employees, and centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl ActiveStatus {
    pub const OPTIONS: &'static [&'static str] = &["Active", "Inactive"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// Review lifecycle for farmers and procurement batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub const OPTIONS: &'static [&'static str] = &["Pending", "Approved", "Rejected"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown approval status '{other}'")),
        }
    }
}

/// Reviewer verdict on a pending record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target(self) -> ApprovalStatus {
        match self {
            Self::Approve => ApprovalStatus::Approved,
            Self::Reject => ApprovalStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_its_own_inverse() {
        assert_eq!(ActiveStatus::Active.toggled(), ActiveStatus::Inactive);
        assert_eq!(ActiveStatus::Active.toggled().toggled(), ActiveStatus::Active);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("inactive".parse::<ActiveStatus>(), Ok(ActiveStatus::Inactive));
        assert_eq!(" Approved ".parse::<ApprovalStatus>(), Ok(ApprovalStatus::Approved));
        assert!("archived".parse::<ActiveStatus>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ActiveStatus::default(), ActiveStatus::Active);
        assert!(ApprovalStatus::default().is_pending());
    }

    #[test]
    fn test_decision_targets() {
        assert_eq!(Decision::Approve.target(), ApprovalStatus::Approved);
        assert_eq!(Decision::Reject.target(), ApprovalStatus::Rejected);
    }
}
