//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (injected randomness, SHA-256, hex/base64)
//! - Password hashing (scrypt, `salt:digest` storage format)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
