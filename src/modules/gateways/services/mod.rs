pub mod checkout_cache;
pub mod duitku;
pub mod gateway_service;
pub mod gateway_trait;
pub mod http;
pub mod tripay;

pub use checkout_cache::CheckoutUrlCache;
pub use duitku::{DuitkuGateway, DUITKU};
pub use gateway_service::{GatewayInfo, GatewayService};
pub use gateway_trait::{InitiationError, PaymentGateway};
pub use http::build_http_client;
pub use tripay::{TripayGateway, SIGNATURE_HEADER, TRIPAY};
