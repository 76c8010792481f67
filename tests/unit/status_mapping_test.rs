// Property-based tests for callback status classification
//
// Every status string maps to exactly one action, and only the documented
// codes settle or acknowledge a payment.

use paygate::gateways::models::StatusAction;
use paygate::gateways::{DuitkuGateway, TripayGateway};
use proptest::prelude::*;

#[test]
fn test_duitku_documented_codes() {
    assert_eq!(DuitkuGateway::classify_status("00"), StatusAction::MarkPaid);
    assert_eq!(DuitkuGateway::classify_status("01"), StatusAction::Acknowledge);
    assert_eq!(DuitkuGateway::classify_status("02"), StatusAction::Acknowledge);
}

#[test]
fn test_tripay_documented_statuses() {
    assert_eq!(TripayGateway::classify_status("PAID"), StatusAction::MarkPaid);
    assert_eq!(TripayGateway::classify_status("EXPIRED"), StatusAction::Acknowledge);
    assert_eq!(TripayGateway::classify_status("FAILED"), StatusAction::Acknowledge);
}

#[test]
fn test_statuses_are_case_sensitive() {
    assert_eq!(TripayGateway::classify_status("paid"), StatusAction::Reject);
    assert_eq!(TripayGateway::classify_status("Paid"), StatusAction::Reject);
    assert_eq!(DuitkuGateway::classify_status(" 00"), StatusAction::Reject);
}

proptest! {
    #[test]
    fn test_duitku_only_zero_zero_settles(status in ".{0,6}") {
        let action = DuitkuGateway::classify_status(&status);
        prop_assert_eq!(action == StatusAction::MarkPaid, status == "00");
        prop_assert_eq!(
            action == StatusAction::Acknowledge,
            status == "01" || status == "02"
        );
    }

    #[test]
    fn test_tripay_only_paid_settles(status in "[A-Za-z_]{0,10}") {
        let action = TripayGateway::classify_status(&status);
        prop_assert_eq!(action == StatusAction::MarkPaid, status == "PAID");
        prop_assert_eq!(
            action == StatusAction::Acknowledge,
            status == "EXPIRED" || status == "FAILED"
        );
    }

    #[test]
    fn test_unknown_numeric_codes_are_rejected(code in 3u8..100u8) {
        let status = format!("{:02}", code);
        prop_assert_eq!(DuitkuGateway::classify_status(&status), StatusAction::Reject);
    }
}
