pub mod address_validator;
pub mod string_utils;
pub mod time_utils;

// Re-export commonly used functions
pub use address_validator::{AddressValidator, ValidatedAddress};
pub use string_utils::{format_count, group_thousands, is_blank, mask_address};
pub use time_utils::*;
