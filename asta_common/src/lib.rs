pub mod helpers;
mod rupees;
mod secret;

pub use rupees::{Rupees, RupeesConversionError, INR_CURRENCY_CODE, PAISE_PER_RUPEE};
pub use secret::Secret;
