mod payment_signature;

pub use payment_signature::{calculate_payment_signature, PaymentSignature, PaymentSignatureError};
