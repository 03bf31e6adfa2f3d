//! # Hash-Power Submission Handler
//!
//! Entry point for miner proof submissions, plus the admin tuning
//! handlers for difficulty and cooldown.
//!
//! ## Flow
//!
//! ```text
//! handle_submit_hash_power(state, caller, proof, now)
//!   STEP 1 ─ gate            (miner role, pause)        → Unauthorized / ProtocolPaused
//!   STEP 2 ─ cooldown        (now vs last submission)   → CooldownActive
//!   STEP 3 ─ verify proof    (pure, current difficulty) → InvalidProof
//!   ════════ MUTATION BOUNDARY ════════
//!   STEP 4 ─ record          (power += unit, stamp now) → infallible
//! ```
//!
//! Everything above the boundary is read-only; a failure leaves no
//! trace. Step 4 is saturating arithmetic and cannot fail, so partial
//! mutation is impossible.

use democoin_common::constants::{window_remaining, DIFFICULTY_MAX, DIFFICULTY_MIN};
use democoin_common::gate::Capability;
use democoin_common::proof::verify_proof;
use democoin_common::{Address, Proof, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// Processes a proof-of-work submission. Returns the miner's new
/// cumulative hash power.
pub fn handle_submit_hash_power(
    state: &mut ProtocolState,
    caller: Address,
    proof: &Proof,
    now: u64,
) -> Result<u128, ProtocolError> {
    // STEP 1 — gate (role before pause, both read-only).
    state.authorize(&caller, Capability::SubmitProof)?;

    // STEP 2 — cooldown. Only applies once a record exists; a first
    // submission is never throttled.
    if let Some(record) = state.miner(&caller) {
        let remaining =
            window_remaining(record.last_submission_time, state.proof_cooldown_secs(), now);
        if remaining > 0 {
            return Err(ProtocolError::CooldownActive { remaining_secs: remaining });
        }
    }

    // STEP 3 — proof verification against the current difficulty.
    if !verify_proof(proof, state.difficulty()) {
        tracing::warn!("invalid proof from {} at difficulty {}", caller, state.difficulty());
        return Err(ProtocolError::InvalidProof);
    }

    // ══════════════ MUTATION BOUNDARY ══════════════

    // STEP 4 — record the accepted proof (infallible).
    let accepted_power = state.config().hash_power_per_proof;
    let total_power = state.record_accepted_proof(caller, accepted_power, now);

    state.emit(ProtocolEvent::HashPowerSubmitted { miner: caller, accepted_power, total_power });
    tracing::info!("hash power submitted by {}: +{} → {}", caller, accepted_power, total_power);
    Ok(total_power)
}

/// Sets the mining difficulty. Admin-only; the value must stay within
/// `[DIFFICULTY_MIN, DIFFICULTY_MAX]`.
pub fn handle_set_difficulty(
    state: &mut ProtocolState,
    caller: Address,
    difficulty: u8,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    if difficulty < DIFFICULTY_MIN || difficulty > DIFFICULTY_MAX {
        return Err(ProtocolError::OutOfRange {
            value: difficulty as u64,
            min: DIFFICULTY_MIN as u64,
            max: DIFFICULTY_MAX as u64,
        });
    }
    state.difficulty = difficulty;
    state.emit(ProtocolEvent::DifficultyChanged { difficulty });
    tracing::info!("difficulty set to {}", difficulty);
    Ok(())
}

/// Sets the per-miner submission cooldown. Admin-only.
pub fn handle_set_proof_cooldown(
    state: &mut ProtocolState,
    caller: Address,
    cooldown_secs: u64,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    state.proof_cooldown_secs = cooldown_secs;
    state.emit(ProtocolEvent::ProofCooldownChanged { cooldown_secs });
    tracing::info!("proof cooldown set to {}s", cooldown_secs);
    Ok(())
}
