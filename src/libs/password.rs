//! Password hashing.
//!
//! Passwords are stored as the base64 encoding of their SHA-256 digest.

use base64::prelude::*;
use sha2::{Digest, Sha256};

pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    BASE64_STANDARD.encode(digest)
}

pub fn check_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}
