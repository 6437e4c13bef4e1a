use serde::{Deserialize, Serialize};

/// Top-level sections of a credit report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportSection {
    PersonalInfo,
    CreditScores,
    Accounts,
    NegativeItems,
    Inquiries,
    PublicRecords,
}

impl ReportSection {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::PersonalInfo,
            Self::CreditScores,
            Self::Accounts,
            Self::NegativeItems,
            Self::Inquiries,
            Self::PublicRecords,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::CreditScores => "Credit Scores",
            Self::Accounts => "Accounts",
            Self::NegativeItems => "Negative Items",
            Self::Inquiries => "Inquiries",
            Self::PublicRecords => "Public Records",
        }
    }

    /// Field-path prefix and issue category for this section.
    pub const fn key(self) -> &'static str {
        match self {
            Self::PersonalInfo => "personalInfo",
            Self::CreditScores => "creditScores",
            Self::Accounts => "accounts",
            Self::NegativeItems => "negativeItems",
            Self::Inquiries => "inquiries",
            Self::PublicRecords => "publicRecords",
        }
    }
}
