//! Adapters that plug the third-party service clients into the engine's backend traits.
pub mod mail_relay;
pub mod razorpay;
