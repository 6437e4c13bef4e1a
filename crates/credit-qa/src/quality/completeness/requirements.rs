use serde::{Deserialize, Serialize};

use super::super::domain::{
    Bureau, CreditAccount, CreditScores, Inquiry, NegativeItem, PersonalInfo, PublicRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Critical,
    Important,
    Optional,
}

impl RequirementLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Optional => "optional",
        }
    }
}

/// Borrowed view of a field, typed so completeness follows per-type rules.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
    Items(usize),
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    fn text(value: &'a Option<String>) -> Self {
        Self::Text(value.as_deref())
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Self::Text(value) => value.is_some_and(|raw| !raw.trim().is_empty()),
            Self::Number(value) => value.is_some_and(f64::is_finite),
            Self::Items(count) => *count > 0,
            Self::Flag(present) => *present,
        }
    }
}

pub(crate) struct FieldRequirement<T> {
    pub field: &'static str,
    pub weight: f64,
    pub level: RequirementLevel,
    pub value: fn(&T) -> FieldValue<'_>,
}

pub(crate) fn personal_info_requirements() -> Vec<FieldRequirement<PersonalInfo>> {
    type Requirement = FieldRequirement<PersonalInfo>;

    vec![
        Requirement {
            field: "name",
            weight: 30.0,
            level: RequirementLevel::Critical,
            value: |info| FieldValue::text(&info.name),
        },
        Requirement {
            field: "address",
            weight: 25.0,
            level: RequirementLevel::Critical,
            value: |info| FieldValue::text(&info.address),
        },
        Requirement {
            field: "ssn",
            weight: 25.0,
            level: RequirementLevel::Critical,
            value: |info| FieldValue::text(&info.ssn),
        },
        Requirement {
            field: "dateOfBirth",
            weight: 10.0,
            level: RequirementLevel::Important,
            value: |info| FieldValue::text(&info.date_of_birth),
        },
        Requirement {
            field: "phone",
            weight: 5.0,
            level: RequirementLevel::Optional,
            value: |info| FieldValue::text(&info.phone),
        },
        Requirement {
            field: "employers",
            weight: 5.0,
            level: RequirementLevel::Optional,
            value: |info| FieldValue::Items(info.employers.len()),
        },
    ]
}

fn bureau_score(scores: &CreditScores, bureau: Bureau) -> FieldValue<'_> {
    FieldValue::Number(
        scores
            .slot(bureau)
            .and_then(|slot| slot.score)
            .map(f64::from),
    )
}

pub(crate) fn credit_score_requirements() -> Vec<FieldRequirement<CreditScores>> {
    type Requirement = FieldRequirement<CreditScores>;

    vec![
        Requirement {
            field: "anyBureau",
            weight: 40.0,
            level: RequirementLevel::Critical,
            value: |scores| {
                FieldValue::Flag(scores.entries().any(|(_, slot)| slot.score.is_some()))
            },
        },
        Requirement {
            field: "experian",
            weight: 20.0,
            level: RequirementLevel::Important,
            value: |scores| bureau_score(scores, Bureau::Experian),
        },
        Requirement {
            field: "equifax",
            weight: 20.0,
            level: RequirementLevel::Important,
            value: |scores| bureau_score(scores, Bureau::Equifax),
        },
        Requirement {
            field: "transunion",
            weight: 20.0,
            level: RequirementLevel::Important,
            value: |scores| bureau_score(scores, Bureau::TransUnion),
        },
    ]
}

pub(crate) fn account_requirements() -> Vec<FieldRequirement<CreditAccount>> {
    type Requirement = FieldRequirement<CreditAccount>;

    vec![
        Requirement {
            field: "creditor",
            weight: 25.0,
            level: RequirementLevel::Critical,
            value: |account| FieldValue::text(&account.creditor),
        },
        Requirement {
            field: "accountNumber",
            weight: 20.0,
            level: RequirementLevel::Critical,
            value: |account| FieldValue::text(&account.account_number),
        },
        Requirement {
            field: "balance",
            weight: 15.0,
            level: RequirementLevel::Critical,
            value: |account| FieldValue::Number(account.balance),
        },
        Requirement {
            field: "accountType",
            weight: 10.0,
            level: RequirementLevel::Important,
            value: |account| FieldValue::Flag(account.account_type.is_some()),
        },
        Requirement {
            field: "status",
            weight: 10.0,
            level: RequirementLevel::Important,
            value: |account| FieldValue::Flag(account.status.is_some()),
        },
        Requirement {
            field: "dateOpened",
            weight: 10.0,
            level: RequirementLevel::Important,
            value: |account| FieldValue::text(&account.date_opened),
        },
        Requirement {
            field: "creditLimit",
            weight: 5.0,
            level: RequirementLevel::Optional,
            value: |account| FieldValue::Number(account.credit_limit),
        },
        Requirement {
            field: "lastReported",
            weight: 3.0,
            level: RequirementLevel::Optional,
            value: |account| FieldValue::text(&account.last_reported),
        },
        Requirement {
            field: "paymentHistory",
            weight: 2.0,
            level: RequirementLevel::Optional,
            value: |account| FieldValue::Items(account.payment_history.len()),
        },
    ]
}

pub(crate) fn negative_item_requirements() -> Vec<FieldRequirement<NegativeItem>> {
    type Requirement = FieldRequirement<NegativeItem>;

    vec![
        Requirement {
            field: "itemType",
            weight: 25.0,
            level: RequirementLevel::Critical,
            value: |item| FieldValue::Flag(item.item_type.is_some()),
        },
        Requirement {
            field: "creditor",
            weight: 25.0,
            level: RequirementLevel::Critical,
            value: |item| FieldValue::text(&item.creditor),
        },
        Requirement {
            field: "date",
            weight: 20.0,
            level: RequirementLevel::Important,
            value: |item| FieldValue::text(&item.date),
        },
        Requirement {
            field: "amount",
            weight: 15.0,
            level: RequirementLevel::Important,
            value: |item| FieldValue::Number(item.amount),
        },
        Requirement {
            field: "bureaus",
            weight: 10.0,
            level: RequirementLevel::Optional,
            value: |item| FieldValue::Items(item.bureaus.len()),
        },
        Requirement {
            field: "disputeReasons",
            weight: 5.0,
            level: RequirementLevel::Optional,
            value: |item| FieldValue::Items(item.dispute_reasons.len()),
        },
    ]
}

pub(crate) fn inquiry_requirements() -> Vec<FieldRequirement<Inquiry>> {
    type Requirement = FieldRequirement<Inquiry>;

    vec![
        Requirement {
            field: "creditor",
            weight: 40.0,
            level: RequirementLevel::Important,
            value: |inquiry| FieldValue::text(&inquiry.creditor),
        },
        Requirement {
            field: "date",
            weight: 40.0,
            level: RequirementLevel::Important,
            value: |inquiry| FieldValue::text(&inquiry.date),
        },
        Requirement {
            field: "inquiryType",
            weight: 20.0,
            level: RequirementLevel::Optional,
            value: |inquiry| FieldValue::Flag(inquiry.inquiry_type.is_some()),
        },
    ]
}

pub(crate) fn public_record_requirements() -> Vec<FieldRequirement<PublicRecord>> {
    type Requirement = FieldRequirement<PublicRecord>;

    vec![
        Requirement {
            field: "recordType",
            weight: 40.0,
            level: RequirementLevel::Critical,
            value: |record| FieldValue::Flag(record.record_type.is_some()),
        },
        Requirement {
            field: "date",
            weight: 30.0,
            level: RequirementLevel::Important,
            value: |record| FieldValue::text(&record.date),
        },
        Requirement {
            field: "amount",
            weight: 15.0,
            level: RequirementLevel::Optional,
            value: |record| FieldValue::Number(record.amount),
        },
        Requirement {
            field: "status",
            weight: 15.0,
            level: RequirementLevel::Optional,
            value: |record| FieldValue::text(&record.status),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_weight<T>(requirements: &[FieldRequirement<T>]) -> f64 {
        requirements.iter().map(|requirement| requirement.weight).sum()
    }

    #[test]
    fn every_table_totals_one_hundred() {
        assert_eq!(total_weight(&personal_info_requirements()), 100.0);
        assert_eq!(total_weight(&credit_score_requirements()), 100.0);
        assert_eq!(total_weight(&account_requirements()), 100.0);
        assert_eq!(total_weight(&negative_item_requirements()), 100.0);
        assert_eq!(total_weight(&inquiry_requirements()), 100.0);
        assert_eq!(total_weight(&public_record_requirements()), 100.0);
    }

    #[test]
    fn blank_text_and_nan_are_incomplete() {
        assert!(!FieldValue::Text(Some("   ")).is_complete());
        assert!(FieldValue::Text(Some("x")).is_complete());
        assert!(!FieldValue::Number(Some(f64::NAN)).is_complete());
        assert!(FieldValue::Number(Some(0.0)).is_complete());
        assert!(!FieldValue::Items(0).is_complete());
    }
}
