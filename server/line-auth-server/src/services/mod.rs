pub mod login_exchange;

pub use login_exchange::{LoginError, LoginExchange, LoginOutcome};
