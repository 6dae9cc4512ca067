//! # Ascon permutation implementation
//!
//! The Ascon permutation operates on a 320-bit state as 5 64-bit lanes.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Round constants, one per round. A reduced-round permutation uses the
/// final `rounds` entries.
const ROUND_CONSTANTS: [u8; 12] = [
    0xf0, 0xe1, 0xd2, 0xc3, 0xb4, 0xa5, 0x96, 0x87, 0x78, 0x69, 0x5a, 0x4b,
];

/// Full number of rounds (initialization and finalization).
pub(crate) const ROUNDS_A: usize = 12;

/// Reduced number of rounds (between message blocks).
pub(crate) const ROUNDS_B: usize = 6;

/// Ascon state: 5 u64 lanes (320 bits).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct State(pub(crate) [u64; 5]);

/// Apply one Ascon round: constant addition, substitution layer, linear
/// diffusion layer.
#[inline(always)]
fn round(x: &mut [u64; 5], rc: u8) {
    // Constant addition: lane 2, zero-extended.
    x[2] ^= rc as u64;

    // Substitution layer: a 5-bit S-box applied bitwise across the lanes.
    x[0] ^= x[4];
    x[4] ^= x[3];
    x[2] ^= x[1];

    let t0 = !x[0] & x[1];
    let t1 = !x[1] & x[2];
    let t2 = !x[2] & x[3];
    let t3 = !x[3] & x[4];
    let t4 = !x[4] & x[0];

    x[0] ^= t1;
    x[1] ^= t2;
    x[2] ^= t3;
    x[3] ^= t4;
    x[4] ^= t0;

    x[1] ^= x[0];
    x[0] ^= x[4];
    x[3] ^= x[2];
    x[2] = !x[2];

    // Linear diffusion layer: per-lane rotate-XOR.
    x[0] ^= x[0].rotate_right(19) ^ x[0].rotate_right(28);
    x[1] ^= x[1].rotate_right(61) ^ x[1].rotate_right(39);
    x[2] ^= x[2].rotate_right(1) ^ x[2].rotate_right(6);
    x[3] ^= x[3].rotate_right(10) ^ x[3].rotate_right(17);
    x[4] ^= x[4].rotate_right(7) ^ x[4].rotate_right(41);
}

/// Apply the Ascon permutation to the state.
///
/// `rounds` is 12 for initialization/finalization and 6 between message
/// blocks; round `i` of the full schedule uses `ROUND_CONSTANTS[i]`, and a
/// reduced permutation runs only the tail of the schedule.
#[inline(always)]
pub(crate) fn permute(state: &mut State, rounds: usize) {
    debug_assert!(rounds <= ROUNDS_A);

    for &rc in &ROUND_CONSTANTS[ROUNDS_A - rounds..] {
        round(&mut state.0, rc);
    }
}
