pub mod gateways;
pub mod health;
pub mod invoices;
