//! Declarative field descriptors for every section of a dispute letter.
//!
//! Each descriptor names a wire field, whether it is required, its length window and its
//! format, and reads the value through a typed accessor so the tables stay free of
//! string-path lookups.

use std::sync::LazyLock;

use regex::Regex;

use super::super::dates::parse_iso_date;
use super::super::domain::{ConsumerInfo, DisputeItem, LetterFooter, LetterHeader, SupportingDoc};
use super::dispute_items::{REASON_CODES, REQUESTED_ACTIONS};

static TRANSMISSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9-]{8,40}$").expect("valid transmission id pattern"));
static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid alphanumeric pattern"));
static PERSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z' -]*$").expect("valid name pattern"));
static SSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-?\d{2}-?\d{4}$").expect("valid SSN pattern"));
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid ZIP pattern"));
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?1[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").expect("valid phone pattern")
});
static ACCOUNT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9*X-]+$").expect("valid account number pattern"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

pub(crate) const BUREAU_CODES: [&str; 3] = ["experian", "equifax", "transunion"];
pub(crate) const FORMAT_VERSIONS: [&str; 3] = ["3.0", "4.0", "4.1"];
pub(crate) const ITEM_TYPES: [&str; 5] = [
    "ACCOUNT",
    "INQUIRY",
    "PUBLIC_RECORD",
    "PERSONAL_INFO",
    "COLLECTION",
];
pub(crate) const DOC_TYPES: [&str; 9] = [
    "ID",
    "PROOF_OF_ADDRESS",
    "ACCOUNT_STATEMENT",
    "PAYMENT_RECORD",
    "POLICE_REPORT",
    "FTC_AFFIDAVIT",
    "COURT_DOCUMENT",
    "CORRESPONDENCE",
    "OTHER",
];
pub(crate) const DOC_EXTENSIONS: [&str; 6] = ["pdf", "jpg", "jpeg", "png", "tif", "tiff"];
pub(crate) const US_STATES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", "PR", "GU", "VI", "AS", "MP",
];

#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldFormat {
    Any,
    Pattern(&'static LazyLock<Regex>),
    IsoDate,
    OneOf(&'static [&'static str]),
    FileName,
}

impl FieldFormat {
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(pattern) => pattern.is_match(value),
            Self::IsoDate => parse_iso_date(value).is_some(),
            Self::OneOf(allowed) => allowed.iter().any(|entry| entry.eq_ignore_ascii_case(value)),
            Self::FileName => value
                .rsplit_once('.')
                .map(|(stem, extension)| {
                    !stem.is_empty()
                        && DOC_EXTENSIONS
                            .iter()
                            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
                })
                .unwrap_or(false),
        }
    }

    pub fn describe(self) -> String {
        match self {
            Self::Any => "has an invalid value".to_string(),
            Self::Pattern(pattern) => format!("does not match {}", pattern.as_str()),
            Self::IsoDate => "is not an ISO date (YYYY-MM-DD)".to_string(),
            Self::OneOf(allowed) => format!("must be one of {}", allowed.join(", ")),
            Self::FileName => format!(
                "must be a file name ending in .{}",
                DOC_EXTENSIONS.join(", .")
            ),
        }
    }
}

/// Result of checking one descriptor against one entity.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RuleCheck {
    Absent,
    Passed,
    Failed(String),
}

pub(crate) struct FieldRule<T> {
    pub field: &'static str,
    pub required: bool,
    pub min_len: usize,
    pub max_len: usize,
    pub format: FieldFormat,
    pub value: fn(&T) -> Option<&str>,
}

impl<T> FieldRule<T> {
    fn new(
        field: &'static str,
        required: bool,
        (min_len, max_len): (usize, usize),
        format: FieldFormat,
        value: fn(&T) -> Option<&str>,
    ) -> Self {
        Self {
            field,
            required,
            min_len,
            max_len,
            format,
            value,
        }
    }

    pub fn check(&self, entity: &T) -> RuleCheck {
        let Some(value) = (self.value)(entity)
            .map(str::trim)
            .filter(|value| !value.is_empty())
        else {
            return RuleCheck::Absent;
        };

        let length = value.chars().count();
        if length < self.min_len || length > self.max_len {
            return RuleCheck::Failed(format!(
                "has length {length}, expected {}..={}",
                self.min_len, self.max_len
            ));
        }
        if !self.format.matches(value) {
            return RuleCheck::Failed(self.format.describe());
        }
        RuleCheck::Passed
    }
}

pub(crate) fn header_rules() -> Vec<FieldRule<LetterHeader>> {
    type Rule = FieldRule<LetterHeader>;

    vec![
        Rule::new(
            "transmissionId",
            true,
            (8, 40),
            FieldFormat::Pattern(&TRANSMISSION_ID),
            |header| header.transmission_id.as_deref(),
        ),
        Rule::new(
            "submissionDate",
            true,
            (10, 10),
            FieldFormat::IsoDate,
            |header| header.submission_date.as_deref(),
        ),
        Rule::new(
            "submitterName",
            true,
            (2, 100),
            FieldFormat::Any,
            |header| header.submitter_name.as_deref(),
        ),
        Rule::new(
            "submitterId",
            false,
            (3, 20),
            FieldFormat::Pattern(&ALPHANUMERIC),
            |header| header.submitter_id.as_deref(),
        ),
        Rule::new(
            "targetBureau",
            true,
            (1, 20),
            FieldFormat::OneOf(&BUREAU_CODES),
            |header| header.target_bureau.as_deref(),
        ),
        Rule::new(
            "formatVersion",
            true,
            (1, 10),
            FieldFormat::OneOf(&FORMAT_VERSIONS),
            |header| header.format_version.as_deref(),
        ),
    ]
}

pub(crate) fn consumer_rules() -> Vec<FieldRule<ConsumerInfo>> {
    type Rule = FieldRule<ConsumerInfo>;

    vec![
        Rule::new(
            "firstName",
            true,
            (1, 50),
            FieldFormat::Pattern(&PERSON_NAME),
            |consumer| consumer.first_name.as_deref(),
        ),
        Rule::new(
            "middleName",
            false,
            (1, 50),
            FieldFormat::Pattern(&PERSON_NAME),
            |consumer| consumer.middle_name.as_deref(),
        ),
        Rule::new(
            "lastName",
            true,
            (1, 50),
            FieldFormat::Pattern(&PERSON_NAME),
            |consumer| consumer.last_name.as_deref(),
        ),
        Rule::new(
            "ssn",
            true,
            (9, 11),
            FieldFormat::Pattern(&SSN),
            |consumer| consumer.ssn.as_deref(),
        ),
        Rule::new(
            "dateOfBirth",
            true,
            (10, 10),
            FieldFormat::IsoDate,
            |consumer| consumer.date_of_birth.as_deref(),
        ),
        Rule::new(
            "currentAddress.street",
            true,
            (5, 100),
            FieldFormat::Any,
            |consumer| {
                consumer
                    .current_address
                    .as_ref()
                    .and_then(|address| address.street.as_deref())
            },
        ),
        Rule::new(
            "currentAddress.city",
            true,
            (2, 50),
            FieldFormat::Any,
            |consumer| {
                consumer
                    .current_address
                    .as_ref()
                    .and_then(|address| address.city.as_deref())
            },
        ),
        Rule::new(
            "currentAddress.state",
            true,
            (2, 2),
            FieldFormat::OneOf(&US_STATES),
            |consumer| {
                consumer
                    .current_address
                    .as_ref()
                    .and_then(|address| address.state.as_deref())
            },
        ),
        Rule::new(
            "currentAddress.zipCode",
            true,
            (5, 10),
            FieldFormat::Pattern(&ZIP_CODE),
            |consumer| {
                consumer
                    .current_address
                    .as_ref()
                    .and_then(|address| address.zip_code.as_deref())
            },
        ),
        Rule::new(
            "phoneNumbers[0]",
            false,
            (10, 20),
            FieldFormat::Pattern(&PHONE),
            |consumer| consumer.phone_numbers.first().map(String::as_str),
        ),
    ]
}

pub(crate) fn dispute_item_rules() -> Vec<FieldRule<DisputeItem>> {
    type Rule = FieldRule<DisputeItem>;

    vec![
        Rule::new(
            "itemType",
            true,
            (1, 30),
            FieldFormat::OneOf(&ITEM_TYPES),
            |item| item.item_type.as_deref(),
        ),
        Rule::new(
            "creditorName",
            true,
            (2, 100),
            FieldFormat::Any,
            |item| item.creditor_name.as_deref(),
        ),
        Rule::new(
            "accountNumber",
            true,
            (4, 30),
            FieldFormat::Pattern(&ACCOUNT_NUMBER),
            |item| item.account_number.as_deref(),
        ),
        Rule::new(
            "reasonCode",
            true,
            (1, 40),
            FieldFormat::OneOf(&REASON_CODES),
            |item| item.reason_code.as_deref(),
        ),
        Rule::new(
            "description",
            true,
            (10, 500),
            FieldFormat::Any,
            |item| item.description.as_deref(),
        ),
        Rule::new(
            "requestedAction",
            true,
            (1, 20),
            FieldFormat::OneOf(&REQUESTED_ACTIONS),
            |item| item.requested_action.as_deref(),
        ),
        Rule::new(
            "creditorCode",
            false,
            (2, 10),
            FieldFormat::Pattern(&ALPHANUMERIC),
            |item| item.creditor_code.as_deref(),
        ),
    ]
}

pub(crate) fn supporting_doc_rules() -> Vec<FieldRule<SupportingDoc>> {
    type Rule = FieldRule<SupportingDoc>;

    vec![
        Rule::new(
            "docId",
            true,
            (1, 50),
            FieldFormat::Any,
            |doc| doc.doc_id.as_deref(),
        ),
        Rule::new(
            "docType",
            true,
            (1, 30),
            FieldFormat::OneOf(&DOC_TYPES),
            |doc| doc.doc_type.as_deref(),
        ),
        Rule::new(
            "fileName",
            true,
            (1, 255),
            FieldFormat::FileName,
            |doc| doc.file_name.as_deref(),
        ),
        Rule::new(
            "description",
            false,
            (1, 200),
            FieldFormat::Any,
            |doc| doc.description.as_deref(),
        ),
    ]
}

/// Footer descriptors; `totalItems` is numeric and checked separately.
pub(crate) fn footer_rules() -> Vec<FieldRule<LetterFooter>> {
    type Rule = FieldRule<LetterFooter>;

    vec![
        Rule::new(
            "submissionDate",
            true,
            (10, 10),
            FieldFormat::IsoDate,
            |footer| footer.submission_date.as_deref(),
        ),
        Rule::new(
            "expectedResponseDate",
            false,
            (10, 10),
            FieldFormat::IsoDate,
            |footer| footer.expected_response_date.as_deref(),
        ),
        Rule::new(
            "contactEmail",
            false,
            (3, 254),
            FieldFormat::Pattern(&EMAIL),
            |footer| footer.contact_email.as_deref(),
        ),
        Rule::new(
            "contactPhone",
            false,
            (10, 20),
            FieldFormat::Pattern(&PHONE),
            |footer| footer.contact_phone.as_deref(),
        ),
        Rule::new(
            "signature",
            true,
            (2, 100),
            FieldFormat::Any,
            |footer| footer.signature.as_deref(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transmission_id_requires_uppercase_and_length() {
        let rule = &header_rules()[0];
        let mut header = LetterHeader {
            transmission_id: Some("TX-2024-000123".to_string()),
            ..LetterHeader::default()
        };
        assert_eq!(rule.check(&header), RuleCheck::Passed);

        header.transmission_id = Some("tx-2024-000123".to_string());
        assert!(matches!(rule.check(&header), RuleCheck::Failed(_)));

        header.transmission_id = Some("   ".to_string());
        assert_eq!(rule.check(&header), RuleCheck::Absent);
    }

    #[test]
    fn file_names_need_an_accepted_extension() {
        assert!(FieldFormat::FileName.matches("statement.PDF"));
        assert!(FieldFormat::FileName.matches("id-front.jpeg"));
        assert!(!FieldFormat::FileName.matches("notes.docx"));
        assert!(!FieldFormat::FileName.matches(".pdf"));
        assert!(!FieldFormat::FileName.matches("statement"));
    }

    #[test]
    fn zip_codes_accept_plus_four() {
        assert!(ZIP_CODE.is_match("30301"));
        assert!(ZIP_CODE.is_match("30301-1234"));
        assert!(!ZIP_CODE.is_match("3030"));
    }
}
