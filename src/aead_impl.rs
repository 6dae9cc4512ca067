//! # Ascon-128 one-shot implementation
//!
//! This module implements one-shot, in-place Ascon-128 authenticated
//! encryption over whole 8-byte blocks, driving the block-wise
//! [`Session`](crate::Session) controller.
//!
//! # Usage
//!
//! This module provides `no_std`-compatible in-place encryption/decryption:
//!
//! ```
//! use ascon_crypto::{encrypt_in_place, decrypt_in_place, KEY_SIZE, NONCE_SIZE};
//!
//! let key = [0u8; KEY_SIZE];
//! let nonce = [1u8; NONCE_SIZE];
//! let mut data = *b"Secret message!!"; // two 8-byte blocks
//!
//! // Encrypt in-place.
//! let tag = encrypt_in_place(&key, &nonce, &mut data).expect("unaligned message");
//!
//! // Decrypt in-place with authentication.
//! decrypt_in_place(&key, &nonce, &mut data, &tag)
//!     .expect("authentication failed");
//!
//! assert_eq!(&data, b"Secret message!!");
//! ```
//!
//! Messages must be an exact multiple of 8 bytes; this Ascon-128 instance
//! carries no sub-block padding and no associated-data input. For separate
//! input/output buffers, use the RustCrypto [`AsconAead`](crate::AsconAead)
//! traits; for byte-at-a-time framing, use the
//! [`StreamEncryptor`](crate::StreamEncryptor) /
//! [`StreamDecryptor`](crate::StreamDecryptor) adapters.

use crate::session::{Direction, Error, Session};
use crate::{KEY_SIZE, NONCE_SIZE, RATE, TAG_SIZE};

/// Authentication tag (16 bytes).
pub type Tag = [u8; TAG_SIZE];

/// Encrypt a message using Ascon-128 (in-place)
///
/// Encrypts the data in `buffer` in-place and returns the authentication tag.
/// The buffer contains plaintext on input and ciphertext on output, and must
/// be a whole number of 8-byte blocks (`Error::UnalignedMessage` otherwise).
pub fn encrypt_in_place(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    buffer: &mut [u8],
) -> Result<Tag, Error> {
    if buffer.len() % RATE != 0 {
        return Err(Error::UnalignedMessage);
    }

    let mut session = Session::new(key, nonce, Direction::Encrypt);
    let blocks = buffer.len() / RATE;

    for (i, chunk) in buffer.chunks_exact_mut(RATE).enumerate() {
        let mut block = [0u8; RATE];
        block.copy_from_slice(chunk);

        let ciphertext = session.process_block(u64::from_be_bytes(block), i + 1 == blocks)?;
        chunk.copy_from_slice(&ciphertext.to_be_bytes());
    }

    session.finalize_tag()
}

/// Decrypt a message using Ascon-128 (in-place)
///
/// Decrypts the data in `buffer` in-place and verifies the authentication
/// tag. The buffer contains ciphertext on input and plaintext on output.
///
/// On `Error::AuthenticationFailure` the buffer has already been overwritten
/// with unauthenticated plaintext; the caller must discard it.
pub fn decrypt_in_place(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    buffer: &mut [u8],
    tag: &Tag,
) -> Result<(), Error> {
    if buffer.len() % RATE != 0 {
        return Err(Error::UnalignedMessage);
    }

    let mut session = Session::new(key, nonce, Direction::Decrypt);
    let blocks = buffer.len() / RATE;

    for (i, chunk) in buffer.chunks_exact_mut(RATE).enumerate() {
        let mut block = [0u8; RATE];
        block.copy_from_slice(chunk);

        let plaintext = session.process_block(u64::from_be_bytes(block), i + 1 == blocks)?;
        chunk.copy_from_slice(&plaintext.to_be_bytes());
    }

    session.verify_tag(tag)
}
