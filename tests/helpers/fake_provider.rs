// Fake Payment Provider
//
// Serves a canned JSON response on a single POST path and records what the
// gateway sent, so tests can assert on payloads and call counts without
// reaching the real sandbox.

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub use actix_test::TestServer;

pub const DUITKU_INQUIRY_PATH: &str = "/webapi/api/merchant/v2/inquiry";
pub const TRIPAY_CREATE_PATH: &str = "/api/transaction/create";

/// Shared view of the requests the fake provider received
#[derive(Clone)]
pub struct ProviderRecorder {
    status: u16,
    response: Value,
    calls: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

impl ProviderRecorder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Value {
        self.last_body
            .lock()
            .unwrap()
            .clone()
            .expect("provider received no request")
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }
}

/// Running fake provider
pub struct FakeProvider {
    pub server: TestServer,
    pub recorder: ProviderRecorder,
}

impl FakeProvider {
    /// Start a provider answering `path` with `status` and `response`
    pub fn start(path: &'static str, status: u16, response: Value) -> Self {
        let recorder = ProviderRecorder {
            status,
            response,
            calls: Arc::new(AtomicUsize::new(0)),
            last_body: Arc::new(Mutex::new(None)),
            last_authorization: Arc::new(Mutex::new(None)),
        };

        let state = recorder.clone();
        let server = actix_test::start(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route(path, web::post().to(provider_endpoint))
        });

        Self { server, recorder }
    }

    /// Base URL to hand to the gateway under test
    pub fn base_url(&self) -> String {
        format!("http://{}", self.server.addr())
    }
}

async fn provider_endpoint(
    req: HttpRequest,
    body: web::Bytes,
    recorder: web::Data<ProviderRecorder>,
) -> HttpResponse {
    recorder.calls.fetch_add(1, Ordering::SeqCst);

    *recorder.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
    *recorder.last_authorization.lock().unwrap() = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(String::from);

    let status = StatusCode::from_u16(recorder.status).unwrap();
    HttpResponse::build(status).json(&recorder.response)
}
