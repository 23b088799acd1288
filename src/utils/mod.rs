pub mod address_validator;
pub mod amount_math;

// Re-export commonly used types
pub use address_validator::AddressValidator;
pub use amount_math::{Amount, AmountError};
