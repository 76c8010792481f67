// Invoices module
//
// The invoices table belongs to the billing platform; this service only
// records settlements reported by the gateways.

pub mod repositories;

pub use repositories::InvoiceLedger;
