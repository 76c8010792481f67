// Integration tests for the Duitku gateway against a local fake inquiry API

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use paygate::core::signature::sha256_hex;
use paygate::gateways::models::WebhookAction;
use paygate::gateways::{
    DuitkuGateway, InitiationError, PaymentGateway, WebhookNotification, WebhookRejection,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn success_response() -> Value {
    json!({
        "merchantCode": DUITKU_MERCHANT_CODE,
        "reference": "DS1234524ABCDEF",
        "paymentUrl": "https://sandbox.duitku.com/topup/topupdirectv2.aspx?ref=DS1234524ABCDEF",
        "statusCode": "00",
        "statusMessage": "SUCCESS"
    })
}

fn callback(order_ref: &str, status_code: &str, api_key: &str) -> WebhookNotification {
    let body = json!({
        "merchantOrderId": order_ref,
        "statusCode": status_code,
        "signature": DuitkuGateway::callback_signature(order_ref, status_code, api_key),
    });
    WebhookNotification::new(body.to_string())
}

/// Test the inquiry carries the documented fields and signature
#[actix_web::test]
async fn test_initiate_sends_signed_inquiry() {
    let provider = FakeProvider::start(DUITKU_INQUIRY_PATH, 200, success_response());
    let gateway = duitku_gateway(
        full_settings(),
        Arc::new(RecordingLedger::default()),
        Some(provider.base_url()),
    );

    let url = gateway.initiate(&payment_request("INV-100")).await.unwrap();

    assert_eq!(
        url,
        "https://sandbox.duitku.com/topup/topupdirectv2.aspx?ref=DS1234524ABCDEF"
    );

    let body = provider.recorder.last_body();
    assert_eq!(body["merchantCode"], DUITKU_MERCHANT_CODE);
    assert_eq!(body["paymentAmount"], 150000);
    assert_eq!(body["merchantOrderId"], "INV-100");
    assert_eq!(body["additionalParam"], "");
    assert_eq!(body["merchantUserInfo"], "rina@example.com");
    assert_eq!(body["email"], "rina@example.com");
    assert_eq!(body["callbackUrl"], DUITKU_CALLBACK_URL);
    assert_eq!(body["returnUrl"], "https://billing.example.com/invoices/INV-100");

    let expected_signature = sha256_hex(
        format!("{}INV-100150000{}", DUITKU_MERCHANT_CODE, DUITKU_API_KEY).as_bytes(),
    );
    assert_eq!(body["signature"], expected_signature);

    // Product details travel as a JSON-encoded string
    let products: Value =
        serde_json::from_str(body["productDetails"].as_str().unwrap()).unwrap();
    assert_eq!(products[0]["name"], "Shared Hosting Basic");
    assert_eq!(products[0]["price"], 50000);
    assert_eq!(products[0]["quantity"], 2);
    assert_eq!(products[1]["name"], "Domain .id");

    // Duitku relies on the embedded signature only
    assert_eq!(provider.recorder.last_authorization(), None);
}

/// Test every initiation calls through to the API
#[actix_web::test]
async fn test_initiate_is_not_cached() {
    let provider = FakeProvider::start(DUITKU_INQUIRY_PATH, 200, success_response());
    let gateway = duitku_gateway(
        full_settings(),
        Arc::new(RecordingLedger::default()),
        Some(provider.base_url()),
    );

    gateway.initiate(&payment_request("INV-101")).await.unwrap();
    gateway.initiate(&payment_request("INV-101")).await.unwrap();

    assert_eq!(provider.recorder.calls(), 2);
}

/// Test a 2xx body with a failure status code is declined
#[actix_web::test]
async fn test_failure_status_code_in_body_is_declined() {
    let provider = FakeProvider::start(
        DUITKU_INQUIRY_PATH,
        200,
        json!({"statusCode": "01", "statusMessage": "Merchant not active"}),
    );
    let gateway = duitku_gateway(
        full_settings(),
        Arc::new(RecordingLedger::default()),
        Some(provider.base_url()),
    );

    let result = gateway.initiate(&payment_request("INV-102")).await;
    assert!(matches!(result, Err(InitiationError::Declined { .. })));

    assert_eq!(gateway.pay(&payment_request("INV-102")).await, None);
}

/// Test a non-2xx response is reported with its status
#[actix_web::test]
async fn test_http_error_status() {
    let provider = FakeProvider::start(
        DUITKU_INQUIRY_PATH,
        401,
        json!({"Message": "Wrong signature"}),
    );
    let gateway = duitku_gateway(
        full_settings(),
        Arc::new(RecordingLedger::default()),
        Some(provider.base_url()),
    );

    match gateway.initiate(&payment_request("INV-103")).await {
        Err(InitiationError::HttpStatus { status, body, .. }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Wrong signature"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

/// Test a success status without a payment URL is an unexpected response
#[actix_web::test]
async fn test_missing_payment_url() {
    let provider = FakeProvider::start(DUITKU_INQUIRY_PATH, 200, json!({"statusCode": "00"}));
    let gateway = duitku_gateway(
        full_settings(),
        Arc::new(RecordingLedger::default()),
        Some(provider.base_url()),
    );

    let result = gateway.initiate(&payment_request("INV-104")).await;
    assert!(matches!(
        result,
        Err(InitiationError::UnexpectedResponse { .. })
    ));
}

/// Test missing credentials stop initiation before any outbound call
#[actix_web::test]
async fn test_missing_config_makes_no_call() {
    let provider = FakeProvider::start(DUITKU_INQUIRY_PATH, 200, success_response());
    let settings = paygate::config::ExtensionSettings::new()
        .with("Duitku", "merchant_code", DUITKU_MERCHANT_CODE)
        .with("Duitku", "api_key", "   ")
        .with("Duitku", "callback_url", DUITKU_CALLBACK_URL);
    let gateway = duitku_gateway(
        settings,
        Arc::new(RecordingLedger::default()),
        Some(provider.base_url()),
    );

    let result = gateway.initiate(&payment_request("INV-105")).await;

    assert!(matches!(
        result,
        Err(InitiationError::ConfigMissing {
            gateway: "Duitku",
            key: "api_key"
        })
    ));
    assert_eq!(provider.recorder.calls(), 0);
}

/// Test a paid callback marks the invoice exactly once
#[actix_web::test]
async fn test_paid_callback_marks_invoice_paid() {
    let ledger = Arc::new(RecordingLedger::default());
    let gateway = duitku_gateway(full_settings(), ledger.clone(), None);

    let outcome = gateway
        .handle_webhook(&callback("INV-100", "00", DUITKU_API_KEY))
        .await
        .unwrap();

    assert_eq!(outcome.action, WebhookAction::MarkedPaid);
    assert_eq!(
        ledger.calls(),
        vec![("INV-100".to_string(), "Duitku".to_string())]
    );
}

/// Test expired and failed callbacks are acknowledged without settlement
#[actix_web::test]
async fn test_expired_and_failed_callbacks_are_acknowledged() {
    let ledger = Arc::new(RecordingLedger::default());
    let gateway = duitku_gateway(full_settings(), ledger.clone(), None);

    for status in ["01", "02"] {
        let outcome = gateway
            .handle_webhook(&callback("INV-106", status, DUITKU_API_KEY))
            .await
            .unwrap();
        assert_eq!(outcome.action, WebhookAction::Acknowledged);
    }

    assert!(ledger.calls().is_empty());
}

/// Test an unknown status code is rejected
#[actix_web::test]
async fn test_unknown_status_is_rejected() {
    let ledger = Arc::new(RecordingLedger::default());
    let gateway = duitku_gateway(full_settings(), ledger.clone(), None);

    let result = gateway
        .handle_webhook(&callback("INV-107", "05", DUITKU_API_KEY))
        .await;

    assert!(matches!(result, Err(WebhookRejection::InvalidStatus(s)) if s == "05"));
    assert!(ledger.calls().is_empty());
}

/// Test a callback signed with another key is rejected
#[actix_web::test]
async fn test_callback_signed_with_other_key_is_rejected() {
    let ledger = Arc::new(RecordingLedger::default());
    let gateway = duitku_gateway(full_settings(), ledger.clone(), None);

    let result = gateway
        .handle_webhook(&callback("INV-108", "00", "someone-elses-key"))
        .await;

    assert!(matches!(result, Err(WebhookRejection::InvalidSignature)));
    assert!(ledger.calls().is_empty());
}

/// Test a ledger failure is surfaced as a server-side rejection
#[actix_web::test]
async fn test_ledger_failure() {
    let gateway = duitku_gateway(full_settings(), Arc::new(RecordingLedger::failing()), None);

    let result = gateway
        .handle_webhook(&callback("INV-109", "00", DUITKU_API_KEY))
        .await;

    assert!(matches!(result, Err(WebhookRejection::LedgerFailure(_))));
}
