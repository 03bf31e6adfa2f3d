//! # Mining Reward Engine
//!
//! Converts accumulated hash power and unclaimed time into mintable
//! reward.
//!
//! ## Reward Formula
//!
//! ```text
//! reward = base_reward_per_hour * elapsed_secs * miner_power
//!          ─────────────────────────────────────────────────
//!                    network_power * 3600
//! ```
//!
//! Strictly increasing in elapsed time for a fixed power share, and in
//! power share for a fixed interval. Saturating arithmetic keeps the
//! formula monotone; saturation is unreachable for any state below the
//! supply cap.
//!
//! ## Claim Flow
//!
//! ```text
//! handle_claim_mining_reward(state, caller, now)
//!   STEP 1 ─ gate              (pause, emergency)   → ProtocolPaused / EmergencyMode
//!   STEP 2 ─ hash-power check                       → NoHashPower
//!   STEP 3 ─ compute reward    (pure)
//!   ════════ MUTATION BOUNDARY ════════
//!   STEP 4 ─ mint              (supply-capped)      → SupplyCapExceeded, atomic
//!   STEP 5 ─ reset reward clock
//! ```
//!
//! The mint in step 4 is the only fallible mutation and runs first, so
//! a cap rejection leaves the reward clock untouched.

use democoin_common::constants::SECS_PER_HOUR;
use democoin_common::gate::Capability;
use democoin_common::{Address, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// Reward the miner could claim at `now`. Pure; returns `0` for
/// unknown miners, zero hash power, or a zero elapsed interval.
#[must_use]
pub fn calculate_mining_reward(state: &ProtocolState, miner: &Address, now: u64) -> u128 {
    let record = match state.miner(miner) {
        Some(r) => r,
        None => return 0,
    };
    let network_power = state.network_hash_power();
    if record.total_hash_power == 0 || network_power == 0 {
        return 0;
    }

    let elapsed = now.saturating_sub(record.last_reward_time) as u128;
    let numerator = state
        .config()
        .base_reward_per_hour
        .saturating_mul(elapsed)
        .saturating_mul(record.total_hash_power);
    let denominator = network_power.saturating_mul(SECS_PER_HOUR as u128);

    numerator / denominator
}

/// Claims the accumulated reward: mints it to the caller and restarts
/// the reward clock. Returns the minted amount (possibly zero when no
/// time has elapsed — the clock still resets; the claim consumed the
/// interval).
pub fn handle_claim_mining_reward(
    state: &mut ProtocolState,
    caller: Address,
    now: u64,
) -> Result<u128, ProtocolError> {
    // STEP 1 — gate.
    state.authorize(&caller, Capability::MoveValue)?;

    // STEP 2 — the caller must have mined something, ever.
    if state.total_hash_power(&caller) == 0 {
        return Err(ProtocolError::NoHashPower);
    }

    // STEP 3 — pure computation.
    let reward = calculate_mining_reward(state, &caller, now);

    // ══════════════ MUTATION BOUNDARY ══════════════

    // STEP 4 — supply-capped mint. Fails atomically; the clock below is
    // only touched after the mint committed.
    if reward > 0 {
        state.mint_supply(caller, reward)?;
    }

    // STEP 5 — restart the clock (infallible; record existence was
    // established in step 2).
    if let Some(record) = state.miners.get_mut(&caller) {
        record.last_reward_time = now;
    }

    state.emit(ProtocolEvent::MiningRewardClaimed { miner: caller, reward });
    tracing::info!("mining reward claimed by {}: {}", caller, reward);
    Ok(reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::handle_set_emergency_mode;
    use democoin_common::constants::ONE;
    use democoin_common::ProtocolConfig;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    /// State with hash power recorded directly (proof plumbing is
    /// covered in `mining`).
    fn state_with_power(power_a: u128, power_b: u128) -> ProtocolState {
        let mut s = ProtocolState::new(ProtocolConfig::default(), addr(1));
        if power_a > 0 {
            s.record_accepted_proof(addr(2), power_a, 0);
        }
        if power_b > 0 {
            s.record_accepted_proof(addr(3), power_b, 0);
        }
        s
    }

    #[test]
    fn sole_miner_collects_the_full_hourly_budget() {
        let s = state_with_power(10, 0);
        let reward = calculate_mining_reward(&s, &addr(2), 3_600);
        assert_eq!(reward, 50 * ONE);
    }

    #[test]
    fn reward_is_proportional_to_power_share() {
        let s = state_with_power(10, 30);
        let a = calculate_mining_reward(&s, &addr(2), 3_600);
        let b = calculate_mining_reward(&s, &addr(3), 3_600);
        assert_eq!(a, 50 * ONE / 4);
        assert_eq!(b, 3 * (50 * ONE) / 4);
        assert!(b > a);
    }

    #[test]
    fn reward_strictly_increases_with_elapsed_time() {
        let s = state_with_power(10, 10);
        let one_hour = calculate_mining_reward(&s, &addr(2), 3_600);
        let two_hours = calculate_mining_reward(&s, &addr(2), 7_200);
        assert!(two_hours > one_hour);
        assert_eq!(two_hours, 2 * one_hour);
    }

    #[test]
    fn unknown_miner_reward_is_zero() {
        let s = state_with_power(10, 0);
        assert_eq!(calculate_mining_reward(&s, &addr(9), 3_600), 0);
    }

    #[test]
    fn claim_mints_and_resets_the_clock() {
        let mut s = state_with_power(10, 0);
        let reward = handle_claim_mining_reward(&mut s, addr(2), 3_600).unwrap();
        assert_eq!(reward, 50 * ONE);
        assert_eq!(s.balance_of(&addr(2)), 50 * ONE);
        assert_eq!(s.total_supply(), 50 * ONE);
        assert_eq!(s.last_reward_time(&addr(2)), Some(3_600));

        // Immediately after, nothing further has accrued.
        assert_eq!(calculate_mining_reward(&s, &addr(2), 3_600), 0);
    }

    #[test]
    fn claim_without_power_fails() {
        let mut s = state_with_power(10, 0);
        assert_eq!(
            handle_claim_mining_reward(&mut s, addr(9), 3_600),
            Err(ProtocolError::NoHashPower)
        );
    }

    #[test]
    fn claim_fails_in_emergency_mode() {
        let mut s = state_with_power(10, 0);
        handle_set_emergency_mode(&mut s, addr(1), true).unwrap();
        assert_eq!(
            handle_claim_mining_reward(&mut s, addr(2), 3_600),
            Err(ProtocolError::EmergencyMode)
        );
        // Clock untouched by the failed claim.
        assert_eq!(s.last_reward_time(&addr(2)), Some(0));
    }

    #[test]
    fn claim_hitting_the_supply_cap_fails_atomically() {
        let config = ProtocolConfig { max_supply: ONE, ..Default::default() };
        let mut s = ProtocolState::new(config, addr(1));
        s.record_accepted_proof(addr(2), 10, 0);

        // A year unclaimed as the sole miner dwarfs the 1-token cap.
        let err = handle_claim_mining_reward(&mut s, addr(2), 31_536_000).unwrap_err();
        assert!(matches!(err, ProtocolError::SupplyCapExceeded { .. }));
        assert_eq!(s.total_supply(), 0);
        assert_eq!(s.last_reward_time(&addr(2)), Some(0));
    }
}
