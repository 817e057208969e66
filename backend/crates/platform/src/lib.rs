//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Secure random bytes
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (HS256 JWT)

pub mod crypto;
pub mod password;
pub mod token;
