#![no_std]
#![doc = include_str!("../README.md")]

mod aead_impl;
mod ascon;
mod session;
mod stream;

mod rustcrypto_aead;

pub use aead_impl::{Tag, decrypt_in_place, encrypt_in_place};
pub use rustcrypto_aead::AsconAead;
pub use session::{Direction, Error, Session};
pub use stream::{StreamDecryptor, StreamEncryptor};

pub use aead::{self, AeadInPlace, KeyInit}; // For `AsconAead` users

/// Ascon-128 key size in bytes.
pub const KEY_SIZE: usize = 16;

/// Ascon-128 nonce size in bytes.
pub const NONCE_SIZE: usize = 16;

/// Ascon-128 tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Ascon-128 rate in bytes (one 64-bit lane per block).
pub const RATE: usize = 8;
