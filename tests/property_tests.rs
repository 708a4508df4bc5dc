//! Property-based tests for signup validation and CSV export.
//!
//! No database access required.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use resale_waitlist::db::{SignupDraft, SignupEntry, UserType};
use resale_waitlist::export::{to_csv, CSV_HEADER};
use resale_waitlist::validation::{validate, validate_email, validate_phone, Field};

fn draft(name: &str, email: &str, phone: &str) -> SignupDraft {
    SignupDraft {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        user_type: UserType::Buyer,
        reason: String::new(),
    }
}

proptest! {
    #[test]
    fn prop_blank_name_always_fails(spaces in "[ \t]{0,8}") {
        let errors = validate(&draft(&spaces, "a@b.co", "08012345678"));
        prop_assert!(errors.contains(Field::Name));
    }

    #[test]
    fn prop_name_of_two_or_more_chars_passes(name in "[A-Za-z][A-Za-z .'-]{0,30}[A-Za-z]", pad in " {0,3}") {
        let padded = format!("{}{}{}", pad, name, pad);
        let errors = validate(&draft(&padded, "a@b.co", "08012345678"));
        prop_assert!(!errors.contains(Field::Name));
    }

    #[test]
    fn prop_email_without_at_fails(email in "[a-z0-9.]{1,20}") {
        prop_assert!(!validate_email(&email));
    }

    #[test]
    fn prop_email_without_dot_after_at_fails(local in "[a-z0-9.]{1,10}", domain in "[a-z0-9]{1,10}") {
        let email = format!("{}@{}", local, domain);
        prop_assert!(!validate_email(&email));
    }

    #[test]
    fn prop_simple_emails_pass(local in "[a-z0-9._+]{1,10}", host in "[a-z0-9-]{1,10}", tld in "[a-z]{2,6}") {
        let email = format!("{}@{}.{}", local, host, tld);
        prop_assert!(validate_email(&email));
    }

    #[test]
    fn prop_phone_digit_count_decides(digits in proptest::collection::vec(0u8..10, 1..25), sep in "[ ()+-]{0,1}") {
        let phone: String = digits
            .iter()
            .map(|d| format!("{}{}", d, sep))
            .collect();
        let expected = (10..=15).contains(&digits.len());
        prop_assert_eq!(validate_phone(&phone), expected);
    }

    #[test]
    fn prop_csv_has_header_plus_one_line_per_record(
        names in proptest::collection::vec("[A-Za-z ]{2,12}", 0..8),
    ) {
        let records: Vec<SignupEntry> = names
            .iter()
            .enumerate()
            .map(|(i, name)| SignupEntry {
                id: i.to_string(),
                name: name.clone(),
                email: "a@b.co".to_string(),
                phone: "08012345678".to_string(),
                user_type: UserType::Buyer,
                reason: None,
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
            })
            .collect();

        let csv = to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        prop_assert_eq!(lines[0], CSV_HEADER);
        prop_assert_eq!(lines.len(), records.len() + 1);
        for (line, record) in lines[1..].iter().zip(&records) {
            let expected_prefix = format!("\"{}\",", record.name);
            prop_assert!(line.starts_with(&expected_prefix));
            prop_assert_eq!(line.matches("\",\"").count(), 5);
        }
    }
}

#[test]
fn test_documented_phone_examples() {
    assert!(validate_phone("+234 800 000 0000"));
    assert!(!validate_phone("12345"));
    assert!(validate(&draft("Ada", "a@b.co", "+234 800 000 0000")).is_empty());
}
