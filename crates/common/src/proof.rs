//! # Proof-of-Work Verification
//!
//! Stateless acceptance test for mining submissions. A proof carries a
//! challenge, a nonce, and the solution the miner claims for them; the
//! verifier recomputes the solution and checks it against the difficulty
//! threshold.
//!
//! ## Acceptance Rule
//!
//! ```text
//! solution' = keccak256(challenge || nonce_be32)
//! accept ⇔ solution' == proof.solution
//!        ∧ solution' < 2^(256 - difficulty)     (as 256-bit unsigned)
//! ```
//!
//! The nonce is encoded as a 32-byte big-endian integer, so the
//! preimage is two full 256-bit words: `challenge` then the
//! zero-padded nonce.
//!
//! ## Threshold
//!
//! `threshold(d) = 2^(256 - d)` for `d ∈ [1, 100]` — strictly decreasing
//! in `d`, so higher difficulty accepts a strictly smaller fraction of
//! the hash space. The mapping is fixed at deployment: accept/reject
//! outcomes for a given difficulty never change.
//!
//! Thresholds are 32-byte big-endian arrays and comparisons are
//! lexicographic on the raw bytes, which for big-endian data is numeric
//! order. No bigint arithmetic is needed.
//!
//! Everything here is a pure function: no state, no clock, no side
//! effects.

use serde::{Deserialize, Serialize};
use sha3::{Digest as _, Keccak256};

use crate::constants::{DIFFICULTY_MAX, DIFFICULTY_MIN};
use crate::types::Digest;

/// A proof-of-work submission. Ephemeral: verified and dropped, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The challenge the miner solved against.
    pub challenge: Digest,
    /// The nonce found by brute force.
    pub nonce: u64,
    /// Claimed `keccak256(challenge || nonce)`.
    pub solution: Digest,
}

/// Recomputes the solution digest for `(challenge, nonce)`.
#[must_use]
pub fn compute_solution(challenge: &Digest, nonce: u64) -> Digest {
    let mut nonce_word = [0u8; 32];
    nonce_word[24..].copy_from_slice(&nonce.to_be_bytes());

    let mut hasher = Keccak256::new();
    hasher.update(challenge.as_bytes());
    hasher.update(nonce_word);

    let out = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&out);
    Digest::from_bytes(bytes)
}

/// Returns `2^(256 - difficulty)` as a big-endian 32-byte array.
///
/// Out-of-range inputs are clamped into `[DIFFICULTY_MIN, DIFFICULTY_MAX]`
/// rather than panicking; the engine's `set_difficulty` guard keeps the
/// stored value in range, so clamping is only reachable from direct
/// library use.
#[must_use]
pub fn difficulty_threshold(difficulty: u8) -> [u8; 32] {
    let d = difficulty.clamp(DIFFICULTY_MIN, DIFFICULTY_MAX);

    // Single set bit at position p = 256 - d (LSB = position 0).
    let p = 256 - d as usize;
    let mut threshold = [0u8; 32];
    threshold[31 - p / 8] = 1 << (p % 8);
    threshold
}

/// Whether `solution`, read as a 256-bit big-endian unsigned integer,
/// is strictly below the acceptance threshold for `difficulty`.
#[must_use]
#[inline]
pub fn meets_threshold(solution: &Digest, difficulty: u8) -> bool {
    solution.as_bytes() < &difficulty_threshold(difficulty)
}

/// Full acceptance test: recompute and compare the solution, then check
/// the threshold. Pure; no side effects.
#[must_use]
pub fn verify_proof(proof: &Proof, difficulty: u8) -> bool {
    let recomputed = compute_solution(&proof.challenge, proof.nonce);
    recomputed == proof.solution && meets_threshold(&recomputed, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-forces a valid proof at the given difficulty, the same way
    /// a miner would.
    fn mine(challenge: Digest, difficulty: u8) -> Proof {
        let mut nonce = 0u64;
        loop {
            let solution = compute_solution(&challenge, nonce);
            if meets_threshold(&solution, difficulty) {
                return Proof { challenge, nonce, solution };
            }
            nonce += 1;
        }
    }

    fn challenge(seed: u8) -> Digest {
        Digest::from_bytes([seed; 32])
    }

    #[test]
    fn mined_proof_verifies() {
        let proof = mine(challenge(1), 8);
        assert!(verify_proof(&proof, 8));
    }

    #[test]
    fn tampered_solution_is_rejected() {
        let mut proof = mine(challenge(2), 8);
        let mut bytes = *proof.solution.as_bytes();
        bytes[31] ^= 0x01;
        proof.solution = Digest::from_bytes(bytes);
        assert!(!verify_proof(&proof, 8));
    }

    #[test]
    fn tampered_nonce_is_rejected() {
        let mut proof = mine(challenge(3), 8);
        proof.nonce += 1;
        assert!(!verify_proof(&proof, 8));
    }

    #[test]
    fn threshold_is_strictly_decreasing_in_difficulty() {
        for d in DIFFICULTY_MIN..DIFFICULTY_MAX {
            let easier = difficulty_threshold(d);
            let harder = difficulty_threshold(d + 1);
            assert!(harder < easier, "threshold must shrink from d={} to d={}", d, d + 1);
        }
    }

    #[test]
    fn threshold_matches_power_of_two_layout() {
        // d = 10 → 2^246 → byte 1 (from the left) is 0x40.
        let t = difficulty_threshold(10);
        assert_eq!(t[0], 0x00);
        assert_eq!(t[1], 0x40);
        assert!(t[2..].iter().all(|&b| b == 0));

        // d = 1 → 2^255 → top bit of byte 0.
        let t = difficulty_threshold(1);
        assert_eq!(t[0], 0x80);
    }

    #[test]
    fn easy_proof_fails_at_max_difficulty() {
        // A proof mined at difficulty 1 is overwhelmingly unlikely to
        // clear the 2^156 threshold of difficulty 100.
        let proof = mine(challenge(4), 1);
        assert!(verify_proof(&proof, 1));
        assert!(!verify_proof(&proof, DIFFICULTY_MAX));
    }

    #[test]
    fn verification_is_deterministic() {
        let proof = mine(challenge(5), 8);
        for _ in 0..3 {
            assert!(verify_proof(&proof, 8));
        }
    }
}
