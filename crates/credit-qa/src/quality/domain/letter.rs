use super::report::{lenient, Bureau};
use serde::{Deserialize, Serialize};

/// Dispute submission shaped after the e-OSCAR wire format.
///
/// Every code-like field is carried as the raw string that will be transmitted so that the
/// compliance validator can report format problems instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisputeLetter {
    #[serde(deserialize_with = "lenient::bureau")]
    pub bureau: Option<Bureau>,
    pub header: Option<LetterHeader>,
    pub consumer_info: Option<ConsumerInfo>,
    pub dispute_items: Vec<DisputeItem>,
    pub supporting_docs: Vec<SupportingDoc>,
    pub footer: Option<LetterFooter>,
}

impl DisputeLetter {
    /// Target bureau, preferring the explicit field over the header value.
    pub fn target_bureau(&self) -> Option<Bureau> {
        self.bureau.or_else(|| {
            self.header
                .as_ref()
                .and_then(|header| header.target_bureau.as_deref())
                .and_then(Bureau::parse)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterHeader {
    pub transmission_id: Option<String>,
    pub submission_date: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_id: Option<String>,
    pub target_bureau: Option<String>,
    pub format_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumerInfo {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub ssn: Option<String>,
    pub date_of_birth: Option<String>,
    pub current_address: Option<PostalAddress>,
    pub previous_addresses: Vec<PostalAddress>,
    pub phone_numbers: Vec<String>,
}

impl ConsumerInfo {
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisputeItem {
    pub sequence_number: Option<u32>,
    pub item_type: Option<String>,
    pub creditor_name: Option<String>,
    pub creditor_code: Option<String>,
    pub account_number: Option<String>,
    pub reason_code: Option<String>,
    pub description: Option<String>,
    pub requested_action: Option<String>,
    pub supporting_doc_refs: Vec<String>,
    pub current_balance: Option<f64>,
    pub reported_balance: Option<f64>,
}

impl DisputeItem {
    /// Signature used to detect the same dispute being filed twice.
    pub fn signature(&self) -> String {
        let normalize = |value: &Option<String>| {
            value
                .as_deref()
                .map(|raw| raw.trim().to_ascii_uppercase())
                .unwrap_or_default()
        };
        format!(
            "{}|{}|{}",
            normalize(&self.creditor_name),
            normalize(&self.account_number),
            normalize(&self.reason_code)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupportingDoc {
    pub doc_id: Option<String>,
    pub doc_type: Option<String>,
    pub file_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterFooter {
    pub total_items: Option<u32>,
    pub submission_date: Option<String>,
    pub expected_response_date: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub signature: Option<String>,
}
