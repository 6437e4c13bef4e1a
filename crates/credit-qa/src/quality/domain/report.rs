use serde::{de, Deserialize, Deserializer, Serialize};

/// One of the three nationwide consumer reporting agencies.
///
/// Names are matched case-insensitively, so `"Experian"`, `"TRANS_UNION"` and `"TransUnion"`
/// all deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bureau {
    Experian,
    Equifax,
    TransUnion,
}

impl<'de> Deserialize<'de> for Bureau {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            de::Error::unknown_variant(&raw, &["experian", "equifax", "transunion"])
        })
    }
}

impl Bureau {
    pub const fn ordered() -> [Self; 3] {
        [Self::Experian, Self::Equifax, Self::TransUnion]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Experian => "Experian",
            Self::Equifax => "Equifax",
            Self::TransUnion => "TransUnion",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Experian => "experian",
            Self::Equifax => "equifax",
            Self::TransUnion => "transunion",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['_', ' '], "").as_str() {
            "experian" => Some(Self::Experian),
            "equifax" => Some(Self::Equifax),
            "transunion" => Some(Self::TransUnion),
            _ => None,
        }
    }
}

/// Structured credit report as produced by the extraction pipeline.
///
/// The record is read-only input: validators borrow it and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditReport {
    pub personal_info: PersonalInfo,
    pub credit_scores: CreditScores,
    pub accounts: Vec<CreditAccount>,
    pub negative_items: Vec<NegativeItem>,
    pub inquiries: Vec<Inquiry>,
    pub public_records: Vec<PublicRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_metadata: Option<ProcessingMetadata>,
}

impl CreditReport {
    /// Mean of every bureau score that falls inside the scoring model range.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .credit_scores
            .entries()
            .filter_map(|(_, slot)| slot.score)
            .filter(|score| (300..=850).contains(score))
            .map(f64::from)
            .collect();

        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }

    pub fn has_tradelines(&self) -> bool {
        !self.accounts.is_empty() || !self.negative_items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub address: Option<String>,
    pub previous_addresses: Vec<String>,
    pub ssn: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub employers: Vec<String>,
    pub confidence: PersonalInfoConfidence,
}

/// Extraction confidence per personal-information field, each in `0.0..=1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoConfidence {
    pub name: Option<f32>,
    pub address: Option<f32>,
    pub ssn: Option<f32>,
    pub date_of_birth: Option<f32>,
    pub phone: Option<f32>,
    pub employers: Option<f32>,
}

/// One score slot per bureau.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditScores {
    pub experian: Option<CreditScore>,
    pub equifax: Option<CreditScore>,
    pub transunion: Option<CreditScore>,
}

impl CreditScores {
    pub fn slot(&self, bureau: Bureau) -> Option<&CreditScore> {
        match bureau {
            Bureau::Experian => self.experian.as_ref(),
            Bureau::Equifax => self.equifax.as_ref(),
            Bureau::TransUnion => self.transunion.as_ref(),
        }
    }

    /// Present slots in bureau order.
    pub fn entries(&self) -> impl Iterator<Item = (Bureau, &CreditScore)> + '_ {
        Bureau::ordered()
            .into_iter()
            .filter_map(move |bureau| self.slot(bureau).map(|slot| (bureau, slot)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditScore {
    pub score: Option<i32>,
    #[serde(deserialize_with = "lenient::bureau")]
    pub bureau: Option<Bureau>,
    pub date: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    CreditCard,
    Revolving,
    Installment,
    Mortgage,
    AutoLoan,
    StudentLoan,
    PersonalLoan,
    Collection,
    #[serde(other)]
    Unknown,
}

impl AccountType {
    pub const fn is_revolving(self) -> bool {
        matches!(self, Self::CreditCard | Self::Revolving)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Current,
    #[serde(rename = "30_days_late")]
    ThirtyDaysLate,
    #[serde(rename = "60_days_late")]
    SixtyDaysLate,
    #[serde(rename = "90_days_late")]
    NinetyDaysLate,
    #[serde(rename = "120_days_late")]
    OneTwentyDaysLate,
    ChargeOff,
    Collection,
    Closed,
    Paid,
    #[serde(other)]
    Unknown,
}

impl AccountStatus {
    pub const fn is_late(self) -> bool {
        matches!(
            self,
            Self::ThirtyDaysLate
                | Self::SixtyDaysLate
                | Self::NinetyDaysLate
                | Self::OneTwentyDaysLate
        )
    }

    pub const fn is_derogatory(self) -> bool {
        matches!(self, Self::ChargeOff | Self::Collection)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditAccount {
    pub creditor: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<AccountType>,
    pub balance: Option<f64>,
    pub credit_limit: Option<f64>,
    pub status: Option<AccountStatus>,
    pub date_opened: Option<String>,
    pub last_reported: Option<String>,
    pub payment_history: Vec<PaymentHistoryEntry>,
    pub bureau_balances: BureauBalances,
}

impl CreditAccount {
    /// Last four alphanumeric characters of the account number, ignoring masking.
    pub fn last_four(&self) -> Option<String> {
        self.account_number.as_deref().and_then(last_four)
    }

    pub fn is_revolving(&self) -> bool {
        self.account_type.map(AccountType::is_revolving).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentHistoryEntry {
    /// Reporting month, `YYYY-MM`.
    pub month: String,
    pub status: String,
}

/// Balance for the same tradeline as mirrored by each bureau.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BureauBalances {
    pub experian: Option<f64>,
    pub equifax: Option<f64>,
    pub transunion: Option<f64>,
}

impl BureauBalances {
    pub fn entries(&self) -> Vec<(Bureau, f64)> {
        [
            (Bureau::Experian, self.experian),
            (Bureau::Equifax, self.equifax),
            (Bureau::TransUnion, self.transunion),
        ]
        .into_iter()
        .filter_map(|(bureau, value)| value.filter(|v| v.is_finite()).map(|v| (bureau, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeItemType {
    LatePayment,
    Collection,
    ChargeOff,
    Bankruptcy,
    #[serde(alias = "tax_lien")]
    Lien,
    Judgment,
    Foreclosure,
    Repossession,
    #[serde(other)]
    Unknown,
}

impl NegativeItemType {
    /// Negatives that can only arise from a tradeline the consumer pays on.
    pub const fn is_payment_related(self) -> bool {
        matches!(self, Self::LatePayment | Self::ChargeOff | Self::Repossession)
    }

    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Bankruptcy | Self::Foreclosure | Self::ChargeOff)
    }

    /// FCRA reporting period in years.
    pub const fn reporting_period_years(self) -> i32 {
        match self {
            Self::Bankruptcy => 10,
            _ => 7,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NegativeItem {
    pub item_type: Option<NegativeItemType>,
    pub creditor: Option<String>,
    pub account_number: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub delinquency_date: Option<String>,
    pub impact_score: Option<f32>,
    #[serde(deserialize_with = "lenient::bureaus")]
    pub bureaus: Vec<Bureau>,
    pub dispute_reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryType {
    Hard,
    Soft,
}

impl InquiryType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hard" | "hard_inquiry" | "hard inquiry" => Some(Self::Hard),
            "soft" | "soft_inquiry" | "soft inquiry" => Some(Self::Soft),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for InquiryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| de::Error::unknown_variant(&raw, &["hard", "soft"]))
    }
}

/// Field adapters that turn unrecognised extraction labels into absent values.
///
/// Validators then report the gap as an issue instead of the whole record failing to load.
pub(crate) mod lenient {
    use super::{Bureau, InquiryType};
    use serde::{Deserialize, Deserializer};

    fn label<'de, D, T>(deserializer: D, parse: fn(&str) -> Option<T>) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(parse))
    }

    pub(crate) fn bureau<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Bureau>, D::Error> {
        label(deserializer, Bureau::parse)
    }

    pub(crate) fn inquiry_type<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<InquiryType>, D::Error> {
        label(deserializer, InquiryType::parse)
    }

    pub(crate) fn bureaus<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Bureau>, D::Error> {
        let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .iter()
            .filter_map(serde_json::Value::as_str)
            .filter_map(Bureau::parse)
            .collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inquiry {
    pub creditor: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::inquiry_type")]
    pub inquiry_type: Option<InquiryType>,
    #[serde(deserialize_with = "lenient::bureau")]
    pub bureau: Option<Bureau>,
    pub age_in_months: Option<u32>,
}

impl Inquiry {
    pub fn is_hard(&self) -> bool {
        self.inquiry_type == Some(InquiryType::Hard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicRecordType {
    Bankruptcy,
    TaxLien,
    CivilJudgment,
    Foreclosure,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicRecord {
    pub record_type: Option<PublicRecordType>,
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

/// Provenance attached by the extraction pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingMetadata {
    pub processing_time_ms: u64,
    /// Overall extraction confidence on a 0-100 scale.
    pub confidence: Option<f64>,
    pub extraction_method: Option<String>,
}

/// Normalised creditor name used for fuzzy matching across sections.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last four alphanumeric characters of a possibly masked account number, uppercased.
///
/// `*`, `X` and separators are masking, so `XXXX-12B4` ends in `12B4`.
pub fn last_four(number: &str) -> Option<String> {
    let tail: Vec<char> = number
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() && !c.eq_ignore_ascii_case(&'x'))
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if tail.len() < 4 {
        return None;
    }
    Some(tail[tail.len() - 4..].iter().collect())
}

/// True when either normalised creditor name contains the other.
pub fn creditor_matches(left: &str, right: &str) -> bool {
    let left = normalize_name(left);
    let right = normalize_name(right);
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left == right || left.contains(&right) || right.contains(&left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_four_ignores_masking() {
        let account = CreditAccount {
            account_number: Some("****-1234".to_string()),
            ..CreditAccount::default()
        };
        assert_eq!(account.last_four().as_deref(), Some("1234"));

        let short = CreditAccount {
            account_number: Some("XX9".to_string()),
            ..CreditAccount::default()
        };
        assert_eq!(short.last_four(), None);

        assert_eq!(last_four("0000-1234").as_deref(), Some("1234"));
        assert_eq!(last_four("000012B34").as_deref(), Some("2B34"));
        assert_eq!(last_four("xxxx-12b4").as_deref(), Some("12B4"));
    }

    #[test]
    fn bureau_names_deserialize_case_insensitively() {
        for raw in ["\"Experian\"", "\"EXPERIAN\"", "\"experian\""] {
            let bureau: Bureau = serde_json::from_str(raw).expect("bureau parses");
            assert_eq!(bureau, Bureau::Experian);
        }
        let bureau: Bureau = serde_json::from_str("\"Trans_Union\"").expect("bureau parses");
        assert_eq!(bureau, Bureau::TransUnion);
        assert_eq!(
            serde_json::to_string(&Bureau::TransUnion).expect("bureau serializes"),
            "\"transunion\""
        );
        assert!(serde_json::from_str::<Bureau>("\"Innovis\"").is_err());
    }

    #[test]
    fn unrecognised_labels_load_as_absent_values() {
        let report: CreditReport = serde_json::from_str(
            r#"{
                "creditScores": {
                    "experian": { "score": 712, "bureau": "Experian" },
                    "equifax": { "score": 705, "bureau": "Innovis" }
                },
                "negativeItems": [{ "bureaus": ["Equifax", "Innovis", "TRANSUNION"] }],
                "inquiries": [
                    { "inquiryType": "HARD", "bureau": "TransUnion" },
                    { "inquiryType": "promotional", "bureau": 7 }
                ]
            }"#,
        )
        .expect("report loads");

        let scores = &report.credit_scores;
        assert_eq!(
            scores.experian.as_ref().and_then(|slot| slot.bureau),
            Some(Bureau::Experian)
        );
        assert_eq!(scores.equifax.as_ref().and_then(|slot| slot.bureau), None);
        assert_eq!(
            report.negative_items[0].bureaus,
            vec![Bureau::Equifax, Bureau::TransUnion]
        );
        assert!(report.inquiries[0].is_hard());
        assert_eq!(report.inquiries[0].bureau, Some(Bureau::TransUnion));
        assert_eq!(report.inquiries[1].inquiry_type, None);
        assert_eq!(report.inquiries[1].bureau, None);

        let round_trip: CreditReport =
            serde_json::from_value(serde_json::to_value(&report).expect("report serializes"))
                .expect("report reloads");
        assert_eq!(round_trip, report);
    }

    #[test]
    fn creditor_matching_tolerates_suffixes() {
        assert!(creditor_matches("CHASE BANK", "Chase"));
        assert!(creditor_matches("Capital One, N.A.", "capital one na"));
        assert!(!creditor_matches("Discover", "Synchrony"));
        assert!(!creditor_matches("", "Synchrony"));
    }

    #[test]
    fn unknown_statuses_deserialize_to_catch_all() {
        let status: AccountStatus = serde_json::from_str("\"frozen\"").expect("status parses");
        assert_eq!(status, AccountStatus::Unknown);
        let late: AccountStatus = serde_json::from_str("\"60_days_late\"").expect("late parses");
        assert!(late.is_late());
    }
}
