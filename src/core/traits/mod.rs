pub mod config_store;
pub mod payment_ledger;

pub use config_store::ConfigStore;
pub use payment_ledger::PaymentLedger;
