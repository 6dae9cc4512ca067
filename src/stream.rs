//! # Byte-serial streaming adapters
//!
//! Thin adapters that translate a byte-at-a-time stream into the block-wise
//! [`Session`](crate::Session) protocol. Input bytes are buffered until a
//! full 8-byte block is available; each completed input block yields one
//! completed output block.
//!
//! # Example
//!
//! ```
//! use ascon_crypto::{StreamEncryptor, StreamDecryptor, KEY_SIZE, NONCE_SIZE, RATE};
//!
//! let key = [0u8; KEY_SIZE];
//! let nonce = [1u8; NONCE_SIZE];
//!
//! let mut encryptor = StreamEncryptor::new(&key, &nonce);
//! let mut ciphertext = [0u8; 8];
//! for (i, &byte) in b"8 bytes!".iter().enumerate() {
//!     if let Some(block) = encryptor.push(byte) {
//!         ciphertext[i + 1 - RATE..=i].copy_from_slice(&block);
//!     }
//! }
//! let tag = encryptor.finalize().unwrap();
//!
//! let mut decryptor = StreamDecryptor::new(&key, &nonce);
//! let mut plaintext = [0u8; 8];
//! for (i, &byte) in ciphertext.iter().enumerate() {
//!     if let Some(block) = decryptor.push(byte) {
//!         plaintext[i + 1 - RATE..=i].copy_from_slice(&block);
//!     }
//! }
//! decryptor.verify(&tag).expect("authentication failed");
//! assert_eq!(&plaintext, b"8 bytes!");
//! ```

use crate::aead_impl::Tag;
use crate::session::{Direction, Error, Session};
use crate::{KEY_SIZE, NONCE_SIZE, RATE};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Block accumulator shared by both stream directions.
#[derive(Zeroize, ZeroizeOnDrop)]
struct BlockBuffer {
    buffer: [u8; RATE],
    #[zeroize(skip)]
    len: usize,
}

impl BlockBuffer {
    const fn new() -> Self {
        Self {
            buffer: [0u8; RATE],
            len: 0,
        }
    }

    /// Append one byte; returns the completed block when full.
    fn push(&mut self, byte: u8) -> Option<u64> {
        self.buffer[self.len] = byte;
        self.len += 1;

        if self.len == RATE {
            self.len = 0;
            Some(u64::from_be_bytes(self.buffer))
        } else {
            None
        }
    }

    const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Byte-at-a-time encryption front end over a [`Session`].
pub struct StreamEncryptor {
    session: Session,
    buffer: BlockBuffer,
}

impl StreamEncryptor {
    /// Start an encrypting stream.
    pub fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> Self {
        Self {
            session: Session::new(key, nonce, Direction::Encrypt),
            buffer: BlockBuffer::new(),
        }
    }

    /// Feed one plaintext byte. Every eighth byte completes a block and
    /// returns the corresponding ciphertext block.
    pub fn push(&mut self, byte: u8) -> Option<[u8; RATE]> {
        let block = self.buffer.push(byte)?;

        // A mid-stream block is never the last; the session defers the
        // intermediate permutation, so finalizing later stays exact.
        match self.session.process_block(block, false) {
            Ok(ciphertext) => Some(ciphertext.to_be_bytes()),
            Err(_) => None,
        }
    }

    /// Finish the stream and produce the authentication tag.
    ///
    /// Fails with `Error::UnalignedMessage` if the total input was not a
    /// whole number of 8-byte blocks.
    pub fn finalize(self) -> Result<Tag, Error> {
        if !self.buffer.is_empty() {
            return Err(Error::UnalignedMessage);
        }

        self.session.finalize_tag()
    }
}

/// Byte-at-a-time decryption front end over a [`Session`].
///
/// Plaintext blocks handed out by [`push`](Self::push) are provisional until
/// [`verify`](Self::verify) succeeds.
pub struct StreamDecryptor {
    session: Session,
    buffer: BlockBuffer,
}

impl StreamDecryptor {
    /// Start a decrypting stream.
    pub fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> Self {
        Self {
            session: Session::new(key, nonce, Direction::Decrypt),
            buffer: BlockBuffer::new(),
        }
    }

    /// Feed one ciphertext byte. Every eighth byte completes a block and
    /// returns the corresponding plaintext block.
    pub fn push(&mut self, byte: u8) -> Option<[u8; RATE]> {
        let block = self.buffer.push(byte)?;

        match self.session.process_block(block, false) {
            Ok(plaintext) => Some(plaintext.to_be_bytes()),
            Err(_) => None,
        }
    }

    /// Finish the stream and verify the authentication tag.
    ///
    /// Fails with `Error::UnalignedMessage` on a trailing partial block and
    /// `Error::AuthenticationFailure` on tag mismatch; in both cases all
    /// plaintext already handed out must be discarded.
    pub fn verify(self, tag: &Tag) -> Result<(), Error> {
        if !self.buffer.is_empty() {
            return Err(Error::UnalignedMessage);
        }

        self.session.verify_tag(tag)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use crate::{decrypt_in_place, encrypt_in_place};
    use std::vec::Vec;

    #[test]
    fn test_stream_matches_one_shot() {
        let key = [0x11u8; KEY_SIZE];
        let nonce = [0x22u8; NONCE_SIZE];
        let plaintext: [u8; 24] = std::array::from_fn(|i| (i * 7) as u8);

        let mut expected = plaintext;
        let expected_tag = encrypt_in_place(&key, &nonce, &mut expected).unwrap();

        let mut encryptor = StreamEncryptor::new(&key, &nonce);
        let mut ciphertext = Vec::new();
        for &byte in &plaintext {
            if let Some(block) = encryptor.push(byte) {
                ciphertext.extend_from_slice(&block);
            }
        }
        let tag = encryptor.finalize().unwrap();

        assert_eq!(ciphertext.as_slice(), &expected[..]);
        assert_eq!(tag, expected_tag);
    }

    #[test]
    fn test_stream_decrypt_roundtrip() {
        let key = [0x33u8; KEY_SIZE];
        let nonce = [0x44u8; NONCE_SIZE];
        let plaintext = *b"streamed 16 byte";

        let mut ciphertext = plaintext;
        let tag = encrypt_in_place(&key, &nonce, &mut ciphertext).unwrap();

        let mut decryptor = StreamDecryptor::new(&key, &nonce);
        let mut recovered = Vec::new();
        for &byte in &ciphertext {
            if let Some(block) = decryptor.push(byte) {
                recovered.extend_from_slice(&block);
            }
        }
        decryptor.verify(&tag).expect("authentication failed");

        assert_eq!(recovered.as_slice(), &plaintext[..]);
    }

    #[test]
    fn test_stream_output_cadence() {
        let key = [0u8; KEY_SIZE];
        let nonce = [0u8; NONCE_SIZE];

        let mut encryptor = StreamEncryptor::new(&key, &nonce);

        // No output until the eighth byte of each block.
        for i in 0..7 {
            assert!(encryptor.push(i).is_none());
        }
        assert!(encryptor.push(7).is_some());
        assert!(encryptor.push(8).is_none());
    }

    #[test]
    fn test_partial_block_rejected() {
        let key = [0u8; KEY_SIZE];
        let nonce = [0u8; NONCE_SIZE];

        let mut encryptor = StreamEncryptor::new(&key, &nonce);
        for &byte in b"short" {
            encryptor.push(byte);
        }
        assert_eq!(encryptor.finalize(), Err(Error::UnalignedMessage));

        let mut decryptor = StreamDecryptor::new(&key, &nonce);
        decryptor.push(0xFF);
        assert_eq!(
            decryptor.verify(&[0u8; 16]),
            Err(Error::UnalignedMessage)
        );
    }

    #[test]
    fn test_empty_stream() {
        let key = [0x55u8; KEY_SIZE];
        let nonce = [0x66u8; NONCE_SIZE];

        let tag = StreamEncryptor::new(&key, &nonce).finalize().unwrap();

        let mut empty = [0u8; 0];
        decrypt_in_place(&key, &nonce, &mut empty, &tag).expect("authentication failed");
    }
}
