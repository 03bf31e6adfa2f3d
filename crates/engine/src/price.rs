//! # Price Controller
//!
//! Steers the token price toward the peg from observed supply growth.
//! `steer_price` is the pure core: deterministic in
//! `(previous_price, supply_at_checkpoint, current_supply)`, clamped so
//! a single run never leaves `[0, 2 × target]`. The handler adds the
//! rate limit and re-checkpoints.
//!
//! ## Steering Rule (basis points)
//!
//! ```text
//! grew   g bps ⇒ price = prev * 10_000 / (10_000 + g)   (decreases)
//! shrank s bps ⇒ price = prev * 10_000 / (10_000 - s)   (increases)
//! flat         ⇒ price unchanged
//! ```
//!
//! Relative growth is capped at 10 000 bps per run, so one update can
//! at most halve the price; a zero checkpoint with non-zero supply
//! counts as maximal growth. Net minting since the checkpoint with no
//! offsetting burn strictly decreases or holds the price; burning past
//! the checkpoint raises it, saturating at the ceiling.

use democoin_common::constants::{window_remaining, BPS_DENOMINATOR};
use democoin_common::gate::Capability;
use democoin_common::{Address, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// Pure steering function. `ceiling` is `2 × target`; the result is
/// always within `[0, ceiling]`.
#[must_use]
pub fn steer_price(
    previous_price: u128,
    supply_at_checkpoint: u128,
    current_supply: u128,
    ceiling: u128,
) -> u128 {
    if current_supply == supply_at_checkpoint {
        return previous_price.min(ceiling);
    }

    let steered = if current_supply > supply_at_checkpoint {
        let growth_bps = if supply_at_checkpoint == 0 {
            // First supply ever: relative growth is unbounded, treat as
            // maximal.
            BPS_DENOMINATOR
        } else {
            let raw = (current_supply - supply_at_checkpoint)
                .saturating_mul(BPS_DENOMINATOR)
                / supply_at_checkpoint;
            raw.min(BPS_DENOMINATOR)
        };
        previous_price.saturating_mul(BPS_DENOMINATOR) / (BPS_DENOMINATOR + growth_bps)
    } else {
        // Supply shrank: s is at most BPS_DENOMINATOR by construction.
        let shrink_bps = (supply_at_checkpoint - current_supply)
            .saturating_mul(BPS_DENOMINATOR)
            / supply_at_checkpoint;
        if shrink_bps >= BPS_DENOMINATOR {
            return ceiling;
        }
        previous_price.saturating_mul(BPS_DENOMINATOR) / (BPS_DENOMINATOR - shrink_bps)
    };

    steered.min(ceiling)
}

/// Runs the price controller. Open to any caller; rate-limited to one
/// run per `price_update_interval_secs`. Returns the new price.
pub fn handle_update_price(
    state: &mut ProtocolState,
    caller: Address,
    now: u64,
) -> Result<u128, ProtocolError> {
    state.authorize(&caller, Capability::SteerPrice)?;

    let remaining =
        window_remaining(state.last_price_update, state.config().price_update_interval_secs, now);
    if remaining > 0 {
        return Err(ProtocolError::TooSoon { remaining_secs: remaining });
    }

    let previous = state.current_price;
    let current = steer_price(
        previous,
        state.supply_at_checkpoint,
        state.total_supply,
        state.config().price_ceiling(),
    );

    state.current_price = current;
    state.supply_at_checkpoint = state.total_supply;
    state.last_price_update = now;

    state.emit(ProtocolEvent::PriceUpdated { previous, current });
    tracing::info!("price updated: {} → {}", previous, current);
    Ok(current)
}
