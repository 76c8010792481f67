//! Duitku and Tripay payment gateway extensions for the billing platform.
//!
//! Each gateway starts payments (signed request, checkout URL) and handles
//! provider callbacks (signature check, invoice settlement).

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::gateways;
pub use modules::invoices;
