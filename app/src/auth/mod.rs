//! Authentication helpers
//!
//! argon2 password hashing and locally issued JWT session tokens.

mod password;
mod session;

pub use password::PasswordService;
pub use session::{Claims, SessionTokens, TokenStatus};
