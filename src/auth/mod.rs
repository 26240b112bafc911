//! Authentication: credentials and the bearer token lifecycle.

mod credentials;
mod token;

pub use credentials::Credentials;
pub use token::{Token, TokenManager, DEFAULT_TOKEN_LIFETIME_SECS};
