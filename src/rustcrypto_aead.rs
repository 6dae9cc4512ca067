//! # RustCrypto AEAD trait implementation
//!
//! This module provides implementations of the RustCrypto `aead` traits for
//! Ascon-128.
//!
//! The underlying instance only supports messages that are a whole number of
//! 8-byte blocks and carries no associated-data input; unaligned buffers and
//! non-empty associated data are reported as [`aead::Error`].

use crate::{KEY_SIZE, NONCE_SIZE, TAG_SIZE, decrypt_in_place, encrypt_in_place};
use aead::generic_array::GenericArray;
use aead::{AeadCore, AeadInPlace, Error, KeyInit, KeySizeUser, consts::U0, consts::U16};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ascon-128 cipher implementing RustCrypto traits.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AsconAead {
    key: [u8; KEY_SIZE],
}

impl KeySizeUser for AsconAead {
    type KeySize = U16;
}

impl KeyInit for AsconAead {
    fn new(key: &GenericArray<u8, Self::KeySize>) -> Self {
        let mut cipher = Self {
            key: [0u8; KEY_SIZE],
        };
        cipher.key.copy_from_slice(key);
        cipher
    }
}

impl AeadCore for AsconAead {
    type NonceSize = U16;
    type TagSize = U16;
    type CiphertextOverhead = U0;
}

impl AeadInPlace for AsconAead {
    #[inline]
    fn encrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, Self::TagSize>, Error> {
        // This Ascon-128 instance is fixed to the no-AD configuration.
        if !associated_data.is_empty() {
            return Err(Error);
        }

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce);

        let tag = encrypt_in_place(&self.key, &nonce_bytes, buffer).map_err(|_| Error)?;

        Ok(tag.into())
    }

    #[inline]
    fn decrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &GenericArray<u8, Self::TagSize>,
    ) -> Result<(), Error> {
        if !associated_data.is_empty() {
            return Err(Error);
        }

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce);
        let mut tag_bytes = [0u8; TAG_SIZE];
        tag_bytes.copy_from_slice(tag);

        decrypt_in_place(&self.key, &nonce_bytes, buffer, &tag_bytes).map_err(|_| Error)
    }
}
