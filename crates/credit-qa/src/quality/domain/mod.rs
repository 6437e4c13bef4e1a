mod issue;
mod letter;
mod report;
mod section;

pub use issue::{IssueKind, Severity, ValidationIssue};
pub(crate) use issue::{clamp_score, round1};
pub use letter::{
    ConsumerInfo, DisputeItem, DisputeLetter, LetterFooter, LetterHeader, PostalAddress,
    SupportingDoc,
};
pub use report::{
    creditor_matches, last_four, normalize_name, AccountStatus, AccountType, Bureau, BureauBalances,
    CreditAccount, CreditReport, CreditScore, CreditScores, Inquiry, InquiryType, NegativeItem,
    NegativeItemType, PaymentHistoryEntry, PersonalInfo, PersonalInfoConfidence,
    ProcessingMetadata, PublicRecord, PublicRecordType,
};
pub use section::ReportSection;
