//! # Ascon-128 AEAD session controller
//!
//! A [`Session`] owns one 320-bit permutation state plus the key, and drives
//! the Ascon-128 protocol: initialization, block-wise processing at a 64-bit
//! rate, finalization, and tag production or verification.
//!
//! The controller is the lane-oriented core; byte-level callers should use
//! [`encrypt_in_place`](crate::encrypt_in_place) /
//! [`decrypt_in_place`](crate::decrypt_in_place) or the streaming adapters
//! instead.
//!
//! A session handles exactly one message. Nonce uniqueness per key is a
//! caller obligation and is not (cannot be) detected here.

use crate::aead_impl::Tag;
use crate::ascon::{ROUNDS_A, ROUNDS_B, State, permute};
use crate::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ascon-128 initialization vector (parameter encoding: 128-bit key, 64-bit
/// rate, 12 initialization/finalization rounds, 6 intermediate rounds).
const IV: u64 = 0x80400c0600000000;

/// Which way a session transforms data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Errors surfaced by the session controller and the byte-level APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key is not exactly 16 bytes.
    InvalidKeyLength,
    /// The nonce is not exactly 16 bytes.
    InvalidNonceLength,
    /// An operation was issued in the wrong session state (after the last
    /// block, or against a session of the opposite direction).
    SessionClosed,
    /// Tag verification failed; any plaintext already produced is
    /// unauthenticated and must be discarded.
    AuthenticationFailure,
    /// The message is not a whole number of 8-byte blocks. This instance
    /// provides no sub-block padding.
    UnalignedMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Processing,
    Finalized,
}

/// One Ascon-128 AEAD session: a single message in a single direction.
///
/// Created with [`Session::init`] (or [`Session::new`] for fixed-size
/// inputs), fed one 64-bit block at a time with [`Session::process_block`],
/// and consumed by [`Session::finalize_tag`] or [`Session::verify_tag`].
/// State and key material are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Session {
    state: State,
    key: [u64; 2],
    #[zeroize(skip)]
    direction: Direction,
    #[zeroize(skip)]
    phase: Phase,
    #[zeroize(skip)]
    pending_permute: bool,
}

impl Session {
    /// Start a session, validating key and nonce lengths.
    pub fn init(key: &[u8], nonce: &[u8], direction: Direction) -> Result<Self, Error> {
        let key: &[u8; KEY_SIZE] = key.try_into().map_err(|_| Error::InvalidKeyLength)?;
        let nonce: &[u8; NONCE_SIZE] = nonce.try_into().map_err(|_| Error::InvalidNonceLength)?;

        Ok(Self::new(key, nonce, direction))
    }

    /// Start a session from fixed-size key and nonce.
    ///
    /// Loads `(IV, K0, K1, N0, N1)` into the state, runs the full
    /// permutation, folds the key back into the capacity, and sets the
    /// domain-separator bit for the fixed no-associated-data configuration.
    pub fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], direction: Direction) -> Self {
        let key_words = u128::from_be_bytes(*key);
        let nonce_words = u128::from_be_bytes(*nonce);
        let k0 = (key_words >> 64) as u64;
        let k1 = key_words as u64;

        let mut state = State([
            IV,
            k0,
            k1,
            (nonce_words >> 64) as u64,
            nonce_words as u64,
        ]);
        permute(&mut state, ROUNDS_A);
        state.0[3] ^= k0;
        state.0[4] ^= k1;
        state.0[4] ^= 1; // no-AD domain separator

        Self {
            state,
            key: [k0, k1],
            direction,
            phase: Phase::Processing,
            pending_permute: false,
        }
    }

    /// The direction this session was created with.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Process one 64-bit block and return the transformed block.
    ///
    /// Encrypting: the input is a plaintext block and the output is the
    /// ciphertext block. Decrypting: the reverse. Blocks are emitted in
    /// submission order, one per call.
    ///
    /// The intermediate 6-round permutation runs before the *next* block is
    /// absorbed, so a caller may either mark the final block with
    /// `is_last = true` or simply stop and finalize; both yield identical
    /// output. After `is_last = true` the session only accepts
    /// [`finalize_tag`](Self::finalize_tag) /
    /// [`verify_tag`](Self::verify_tag).
    pub fn process_block(&mut self, block: u64, is_last: bool) -> Result<u64, Error> {
        if self.phase != Phase::Processing {
            return Err(Error::SessionClosed);
        }

        if self.pending_permute {
            permute(&mut self.state, ROUNDS_B);
            self.pending_permute = false;
        }

        let output = self.state.0[0] ^ block;

        // Either way lane 0 ends up holding the ciphertext block.
        self.state.0[0] = match self.direction {
            Direction::Encrypt => output,
            Direction::Decrypt => block,
        };

        if is_last {
            self.finalize_state();
        } else {
            self.pending_permute = true;
        }

        Ok(output)
    }

    /// Produce the 128-bit authentication tag (encrypt sessions only).
    ///
    /// Zero-block messages are legal: `init` followed directly by
    /// `finalize_tag`.
    pub fn finalize_tag(mut self) -> Result<Tag, Error> {
        if self.direction != Direction::Encrypt {
            return Err(Error::SessionClosed);
        }

        if self.phase == Phase::Processing {
            self.finalize_state();
        }

        Ok(self.tag())
    }

    /// Verify a caller-supplied tag (decrypt sessions only).
    ///
    /// The comparison is constant-time. On failure, plaintext blocks already
    /// returned by [`process_block`](Self::process_block) are
    /// unauthenticated and must be discarded by the caller.
    pub fn verify_tag(mut self, candidate: &Tag) -> Result<(), Error> {
        if self.direction != Direction::Decrypt {
            return Err(Error::SessionClosed);
        }

        if self.phase == Phase::Processing {
            self.finalize_state();
        }

        if self.tag().ct_eq(candidate).into() {
            Ok(())
        } else {
            Err(Error::AuthenticationFailure)
        }
    }

    /// Finalization: fold the key into lanes 1/2, then the full permutation.
    fn finalize_state(&mut self) {
        self.state.0[1] ^= self.key[0];
        self.state.0[2] ^= self.key[1];
        permute(&mut self.state, ROUNDS_A);
        self.phase = Phase::Finalized;
    }

    /// Tag = (lane3 ^ K0) ‖ (lane4 ^ K1), big-endian, high word first.
    fn tag(&self) -> Tag {
        let mut tag = [0u8; TAG_SIZE];
        tag[..8].copy_from_slice(&(self.state.0[3] ^ self.key[0]).to_be_bytes());
        tag[8..].copy_from_slice(&(self.state.0[4] ^ self.key[1]).to_be_bytes());
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_bad_lengths() {
        assert_eq!(
            Session::init(&[0u8; 15], &[0u8; 16], Direction::Encrypt).err(),
            Some(Error::InvalidKeyLength)
        );
        assert_eq!(
            Session::init(&[0u8; 16], &[0u8; 17], Direction::Encrypt).err(),
            Some(Error::InvalidNonceLength)
        );
        assert!(Session::init(&[0u8; 16], &[0u8; 16], Direction::Encrypt).is_ok());
    }

    #[test]
    fn test_process_after_last_block_is_closed() {
        let mut session = Session::new(&[0u8; 16], &[0u8; 16], Direction::Encrypt);

        session.process_block(0, true).unwrap();

        assert_eq!(session.process_block(0, false), Err(Error::SessionClosed));
        assert_eq!(session.process_block(0, true), Err(Error::SessionClosed));
    }

    #[test]
    fn test_wrong_direction_is_closed() {
        let enc = Session::new(&[0u8; 16], &[0u8; 16], Direction::Encrypt);
        assert_eq!(enc.verify_tag(&[0u8; 16]), Err(Error::SessionClosed));

        let dec = Session::new(&[0u8; 16], &[0u8; 16], Direction::Decrypt);
        assert_eq!(dec.finalize_tag(), Err(Error::SessionClosed));
    }

    #[test]
    fn test_zero_block_message_tag() {
        // With key = nonce = 0 an all-zero plaintext block leaves lane 0
        // unchanged, so the zero-block tag matches the single-zero-block
        // known answer.
        let session = Session::new(&[0u8; 16], &[0u8; 16], Direction::Encrypt);
        let tag = session.finalize_tag().unwrap();

        let expected: [u8; 16] = [
            0xea, 0xf0, 0xf7, 0xb7, 0xa3, 0x2b, 0x80, 0x7e, 0x91, 0xee, 0x43, 0x71, 0x83, 0xd1,
            0x4b, 0x71,
        ];
        assert_eq!(tag, expected);
    }

    #[test]
    fn test_zero_block_roundtrip() {
        let key = [7u8; 16];
        let nonce = [9u8; 16];

        let enc = Session::new(&key, &nonce, Direction::Encrypt);
        let tag = enc.finalize_tag().unwrap();

        let dec = Session::new(&key, &nonce, Direction::Decrypt);
        dec.verify_tag(&tag).unwrap();
    }

    #[test]
    fn test_marked_last_equals_plain_finalize() {
        let key = [0x11u8; 16];
        let nonce = [0x22u8; 16];
        let blocks = [0xAAAA_AAAA_AAAA_AAAA_u64, 0xBBBB_BBBB_BBBB_BBBB];

        let mut eager = Session::new(&key, &nonce, Direction::Encrypt);
        let mut lazy = Session::new(&key, &nonce, Direction::Encrypt);

        let mut eager_ct = [0u64; 2];
        let mut lazy_ct = [0u64; 2];
        for (i, &block) in blocks.iter().enumerate() {
            eager_ct[i] = eager.process_block(block, i == blocks.len() - 1).unwrap();
            lazy_ct[i] = lazy.process_block(block, false).unwrap();
        }

        assert_eq!(eager_ct, lazy_ct);
        assert_eq!(eager.finalize_tag().unwrap(), lazy.finalize_tag().unwrap());
    }

    #[test]
    fn test_two_block_known_answer() {
        let key = [0x01u8; 16];
        let nonce = [0x02u8; 16];

        let mut session = Session::new(&key, &nonce, Direction::Encrypt);
        let ct0 = session.process_block(0xAAAA_AAAA_AAAA_AAAA, false).unwrap();
        let ct1 = session.process_block(0xBBBB_BBBB_BBBB_BBBB, true).unwrap();
        let tag = session.finalize_tag().unwrap();

        assert_eq!(ct0, 0x32f5_bb4d_8a0a_8b3f);
        assert_eq!(ct1, 0x119e_fc19_2586_e30b);

        let expected_tag: [u8; 16] = [
            0x0a, 0x06, 0x46, 0x5e, 0xf6, 0x7f, 0x0a, 0x4e, 0x18, 0x4c, 0xa4, 0xd2, 0xad, 0x45,
            0xdd, 0xc5,
        ];
        assert_eq!(tag, expected_tag);
    }

    #[test]
    fn test_decrypt_verifies_and_recovers() {
        let key = [0x01u8; 16];
        let nonce = [0x02u8; 16];

        let mut dec = Session::new(&key, &nonce, Direction::Decrypt);
        let pt0 = dec.process_block(0x32f5_bb4d_8a0a_8b3f, false).unwrap();
        let pt1 = dec.process_block(0x119e_fc19_2586_e30b, true).unwrap();

        assert_eq!(pt0, 0xAAAA_AAAA_AAAA_AAAA);
        assert_eq!(pt1, 0xBBBB_BBBB_BBBB_BBBB);

        let tag: [u8; 16] = [
            0x0a, 0x06, 0x46, 0x5e, 0xf6, 0x7f, 0x0a, 0x4e, 0x18, 0x4c, 0xa4, 0xd2, 0xad, 0x45,
            0xdd, 0xc5,
        ];
        dec.verify_tag(&tag).unwrap();
    }

    #[test]
    fn test_bad_tag_fails() {
        let key = [0x01u8; 16];
        let nonce = [0x02u8; 16];

        let mut dec = Session::new(&key, &nonce, Direction::Decrypt);
        dec.process_block(0x32f5_bb4d_8a0a_8b3f, true).unwrap();

        assert_eq!(
            dec.verify_tag(&[0u8; 16]),
            Err(Error::AuthenticationFailure)
        );
    }
}
