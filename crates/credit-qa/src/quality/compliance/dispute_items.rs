use serde::{Deserialize, Serialize};

/// Wire codes accepted in `reasonCode`.
pub(crate) const REASON_CODES: [&str; 12] = [
    "NOT_MINE",
    "INACCURATE_BALANCE",
    "INACCURATE_STATUS",
    "INACCURATE_DATES",
    "PAID_IN_FULL",
    "DUPLICATE",
    "IDENTITY_THEFT",
    "OBSOLETE",
    "NEVER_LATE",
    "UNAUTHORIZED_INQUIRY",
    "INCORRECT_PERSONAL_INFO",
    "BANKRUPTCY_DISCHARGED",
];

/// Wire codes accepted in `requestedAction`.
pub(crate) const REQUESTED_ACTIONS: [&str; 5] = ["DELETE", "REMOVE", "UPDATE", "CORRECT", "VERIFY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NotMine,
    InaccurateBalance,
    InaccurateStatus,
    InaccurateDates,
    PaidInFull,
    Duplicate,
    IdentityTheft,
    Obsolete,
    NeverLate,
    UnauthorizedInquiry,
    IncorrectPersonalInfo,
    BankruptcyDischarged,
}

impl ReasonCode {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::NotMine,
            Self::InaccurateBalance,
            Self::InaccurateStatus,
            Self::InaccurateDates,
            Self::PaidInFull,
            Self::Duplicate,
            Self::IdentityTheft,
            Self::Obsolete,
            Self::NeverLate,
            Self::UnauthorizedInquiry,
            Self::IncorrectPersonalInfo,
            Self::BankruptcyDischarged,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::NotMine => "NOT_MINE",
            Self::InaccurateBalance => "INACCURATE_BALANCE",
            Self::InaccurateStatus => "INACCURATE_STATUS",
            Self::InaccurateDates => "INACCURATE_DATES",
            Self::PaidInFull => "PAID_IN_FULL",
            Self::Duplicate => "DUPLICATE",
            Self::IdentityTheft => "IDENTITY_THEFT",
            Self::Obsolete => "OBSOLETE",
            Self::NeverLate => "NEVER_LATE",
            Self::UnauthorizedInquiry => "UNAUTHORIZED_INQUIRY",
            Self::IncorrectPersonalInfo => "INCORRECT_PERSONAL_INFO",
            Self::BankruptcyDischarged => "BANKRUPTCY_DISCHARGED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|reason| reason.code().eq_ignore_ascii_case(raw))
    }

    /// Actions a bureau will act on for this reason.
    pub const fn compatible_actions(self) -> &'static [RequestedAction] {
        use RequestedAction::*;
        match self {
            Self::NotMine
            | Self::Duplicate
            | Self::IdentityTheft
            | Self::Obsolete
            | Self::UnauthorizedInquiry => &[Delete, Remove],
            Self::InaccurateBalance | Self::InaccurateStatus | Self::InaccurateDates => {
                &[Update, Correct, Verify]
            }
            Self::PaidInFull | Self::NeverLate | Self::BankruptcyDischarged => &[Update, Correct],
            Self::IncorrectPersonalInfo => &[Correct, Update],
        }
    }

    pub fn accepts(self, action: RequestedAction) -> bool {
        self.compatible_actions().contains(&action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestedAction {
    Delete,
    Remove,
    Update,
    Correct,
    Verify,
}

impl RequestedAction {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Remove => "REMOVE",
            Self::Update => "UPDATE",
            Self::Correct => "CORRECT",
            Self::Verify => "VERIFY",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [
            Self::Delete,
            Self::Remove,
            Self::Update,
            Self::Correct,
            Self::Verify,
        ]
        .into_iter()
        .find(|action| action.code().eq_ignore_ascii_case(raw))
    }
}

/// Sequence numbers must run 1..=N with no gaps or repeats.
pub(crate) fn sequence_is_contiguous(sequence: &[Option<u32>]) -> bool {
    let mut numbers: Vec<u32> = Vec::with_capacity(sequence.len());
    for number in sequence {
        match number {
            Some(number) => numbers.push(*number),
            None => return false,
        }
    }
    numbers.sort_unstable();
    numbers
        .iter()
        .enumerate()
        .all(|(index, number)| *number as usize == index + 1)
}
