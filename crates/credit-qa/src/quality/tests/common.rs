use chrono::NaiveDate;

use crate::quality::domain::{
    AccountStatus, AccountType, Bureau, BureauBalances, ConsumerInfo, CreditAccount, CreditReport,
    CreditScore, CreditScores, DisputeItem, DisputeLetter, Inquiry, InquiryType, LetterFooter,
    LetterHeader, PaymentHistoryEntry, PersonalInfo, PersonalInfoConfidence, PostalAddress,
    ProcessingMetadata, SupportingDoc, ValidationIssue,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// First issue raised against `field`.
pub(super) fn issue_at<'a>(issues: &'a [ValidationIssue], field: &str) -> Option<&'a ValidationIssue> {
    issues.iter().find(|issue| issue.field == field)
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub(super) fn score(bureau: Bureau, value: i32) -> Option<CreditScore> {
    Some(CreditScore {
        score: Some(value),
        bureau: Some(bureau),
        date: text("2025-05-15"),
        model: text("FICO 8"),
    })
}

pub(super) fn scores(experian: i32, equifax: i32, transunion: i32) -> CreditScores {
    CreditScores {
        experian: score(Bureau::Experian, experian),
        equifax: score(Bureau::Equifax, equifax),
        transunion: score(Bureau::TransUnion, transunion),
    }
}

pub(super) fn card_account() -> CreditAccount {
    CreditAccount {
        creditor: text("Chase Bank"),
        account_number: text("****1234"),
        account_type: Some(AccountType::CreditCard),
        balance: Some(1200.0),
        credit_limit: Some(5000.0),
        status: Some(AccountStatus::Current),
        date_opened: text("2018-03-10"),
        last_reported: text("2025-05-01"),
        payment_history: vec![
            PaymentHistoryEntry {
                month: "2025-04".to_string(),
                status: "OK".to_string(),
            },
            PaymentHistoryEntry {
                month: "2025-05".to_string(),
                status: "OK".to_string(),
            },
        ],
        bureau_balances: BureauBalances {
            experian: Some(1200.0),
            equifax: Some(1200.0),
            transunion: Some(1200.0),
        },
    }
}

pub(super) fn auto_loan() -> CreditAccount {
    CreditAccount {
        creditor: text("Toyota Motor Credit"),
        account_number: text("****5678"),
        account_type: Some(AccountType::AutoLoan),
        balance: Some(8000.0),
        credit_limit: Some(20000.0),
        status: Some(AccountStatus::Current),
        date_opened: text("2022-01-15"),
        last_reported: text("2025-05-01"),
        payment_history: vec![PaymentHistoryEntry {
            month: "2025-05".to_string(),
            status: "OK".to_string(),
        }],
        bureau_balances: BureauBalances {
            experian: Some(8000.0),
            equifax: Some(8000.0),
            transunion: Some(8000.0),
        },
    }
}

/// A fully populated, internally consistent record with no findings.
pub(super) fn clean_report() -> CreditReport {
    CreditReport {
        personal_info: PersonalInfo {
            name: text("Jordan Avery Smith"),
            address: text("123 Main Street, Springfield, IL 62701"),
            previous_addresses: vec!["45 Oak Avenue, Springfield, IL 62702".to_string()],
            ssn: text("123-45-6789"),
            date_of_birth: text("1985-04-12"),
            phone: text("(217) 555-0147"),
            employers: vec!["Acme Logistics".to_string()],
            confidence: PersonalInfoConfidence {
                name: Some(0.95),
                address: Some(0.92),
                ssn: Some(0.97),
                date_of_birth: Some(0.9),
                phone: Some(0.9),
                employers: Some(0.85),
            },
        },
        credit_scores: scores(720, 715, 728),
        accounts: vec![card_account(), auto_loan()],
        negative_items: Vec::new(),
        inquiries: vec![Inquiry {
            creditor: text("Capital One"),
            date: text("2025-04-20"),
            inquiry_type: Some(InquiryType::Hard),
            bureau: Some(Bureau::Experian),
            age_in_months: Some(1),
        }],
        public_records: Vec::new(),
        processing_metadata: Some(ProcessingMetadata {
            processing_time_ms: 4_200,
            confidence: Some(93.0),
            extraction_method: text("ocr+llm"),
        }),
    }
}

pub(super) fn dispute_item(sequence: u32, creditor: &str, account: &str) -> DisputeItem {
    DisputeItem {
        sequence_number: Some(sequence),
        item_type: text("COLLECTION"),
        creditor_name: text(creditor),
        creditor_code: text("MCM01"),
        account_number: text(account),
        reason_code: text("NOT_MINE"),
        description: text("This collection account does not belong to me."),
        requested_action: text("DELETE"),
        supporting_doc_refs: vec!["DOC-1".to_string()],
        current_balance: Some(0.0),
        reported_balance: Some(640.0),
    }
}

/// A well-formed single-item letter addressed to Experian.
pub(super) fn clean_letter() -> DisputeLetter {
    DisputeLetter {
        bureau: Some(Bureau::Experian),
        header: Some(LetterHeader {
            transmission_id: text("TX-20250520-0001"),
            submission_date: text("2025-05-20"),
            submitter_name: text("Jordan Avery Smith"),
            submitter_id: text("JAS001"),
            target_bureau: text("experian"),
            format_version: text("4.1"),
        }),
        consumer_info: Some(ConsumerInfo {
            first_name: text("Jordan"),
            middle_name: text("Avery"),
            last_name: text("Smith"),
            ssn: text("123-45-6789"),
            date_of_birth: text("1985-04-12"),
            current_address: Some(PostalAddress {
                street: text("123 Main Street"),
                city: text("Springfield"),
                state: text("IL"),
                zip_code: text("62701"),
            }),
            previous_addresses: Vec::new(),
            phone_numbers: vec!["(217) 555-0147".to_string()],
        }),
        dispute_items: vec![dispute_item(1, "Midland Credit", "XXXX9012")],
        supporting_docs: vec![SupportingDoc {
            doc_id: text("DOC-1"),
            doc_type: text("FTC_AFFIDAVIT"),
            file_name: text("ftc-affidavit.pdf"),
            description: text("Identity theft affidavit"),
        }],
        footer: Some(LetterFooter {
            total_items: Some(1),
            submission_date: text("2025-05-20"),
            expected_response_date: text("2025-06-19"),
            contact_email: text("jordan.smith@example.com"),
            contact_phone: text("217-555-0147"),
            signature: text("Jordan Avery Smith"),
        }),
    }
}

/// Letter with `count` distinct, correctly sequenced items.
pub(super) fn letter_with_items(count: u32) -> DisputeLetter {
    let mut letter = clean_letter();
    letter.dispute_items = (1..=count)
        .map(|sequence| {
            dispute_item(
                sequence,
                &format!("Collector {sequence}"),
                &format!("XXXX{:04}", 1000 + sequence),
            )
        })
        .collect();
    if let Some(footer) = letter.footer.as_mut() {
        footer.total_items = Some(count);
    }
    letter
}
