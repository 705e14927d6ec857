//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenKind, TokenPair};
pub use password::{Argon2Hasher, PasswordHasher};
