pub mod amount;
pub mod error;
pub mod signature;
pub mod traits;

pub use error::{AppError, Result};
