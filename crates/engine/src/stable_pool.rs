//! # Stable Pool
//!
//! Fee-bearing deposit facility. Users lock tokens, the pool tracks a
//! proportional share supply, and both directions pay the same fee
//! (basis points of the moved amount) into `pending_fees`.
//!
//! ## Share Accounting
//!
//! Shares are a pool-level supply (`stable_pool_shares`); per-account
//! positions are tracked as deposit amounts. A deposit mints shares at
//! the prevailing share price (1:1 into an empty pool); a withdrawal
//! burns shares and converts them back through
//! `gross = shares * total_stable_pool / shares_outstanding`.
//! All conversions truncate.

use democoin_common::constants::BPS_DENOMINATOR;
use democoin_common::gate::Capability;
use democoin_common::{Address, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// Fee charged on `amount`, in the configured basis points. Truncates;
/// overflow is unreachable below the supply cap but falls back to zero
/// fee rather than wrapping.
#[must_use]
fn pool_fee(fee_bps: u128, amount: u128) -> u128 {
    amount
        .checked_mul(fee_bps)
        .map(|v| v / BPS_DENOMINATOR)
        .unwrap_or(0)
}

/// Pure conversion from a token amount to pool shares at the current
/// share price. An empty pool prices 1:1.
#[must_use]
pub fn calculate_stable_pool_shares(state: &ProtocolState, amount: u128) -> u128 {
    if state.total_stable_pool == 0 || state.stable_pool_shares == 0 {
        return amount;
    }
    amount
        .checked_mul(state.stable_pool_shares)
        .map(|v| v / state.total_stable_pool)
        .unwrap_or(0)
}

/// Advertised pool APY, integer percent.
#[must_use]
pub fn stable_pool_apy(state: &ProtocolState) -> u64 {
    state.config().stable_pool_apy_percent
}

/// Deposits `amount` into the pool. The fee comes out of the deposited
/// amount: the caller's position (and the pool total) grows by
/// `amount - fee`. Returns the net amount credited.
pub fn handle_deposit_to_stable_pool(
    state: &mut ProtocolState,
    caller: Address,
    amount: u128,
) -> Result<u128, ProtocolError> {
    state.authorize(&caller, Capability::MoveValue)?;
    if amount == 0 {
        return Err(ProtocolError::ZeroAmount);
    }

    let available = state.balance_of(&caller);
    if available < amount {
        return Err(ProtocolError::InsufficientBalance { required: amount, available });
    }

    let fee = pool_fee(state.config().pool_fee_bps, amount);
    let net = amount - fee;
    // Shares priced before the pool grows.
    let shares = calculate_stable_pool_shares(state, net);

    // ══════════════ MUTATION BOUNDARY ══════════════

    state.debit_balance(caller, amount)?;
    state.accrue_fee(fee);
    state.account_mut(caller).stable_pool_deposit += net;
    state.total_stable_pool += net;
    state.stable_pool_shares += shares;

    state.emit(ProtocolEvent::StablePoolDeposited { depositor: caller, gross: amount, fee, shares });
    tracing::info!("stable pool deposit by {}: gross {}, fee {}", caller, amount, fee);
    Ok(net)
}

/// Withdraws by burning `shares`. The implied gross amount must fit the
/// caller's recorded deposit; the fee comes out of the gross amount and
/// the remainder is returned to the token balance. Returns the net
/// amount credited.
pub fn handle_withdraw_from_stable_pool(
    state: &mut ProtocolState,
    caller: Address,
    shares: u128,
) -> Result<u128, ProtocolError> {
    state.authorize(&caller, Capability::MoveValue)?;
    if shares == 0 {
        return Err(ProtocolError::ZeroAmount);
    }

    let deposit = state.stable_pool_balance_of(&caller);
    if state.stable_pool_shares == 0 {
        return Err(ProtocolError::InsufficientShares { requested: 0, available: deposit });
    }

    let gross = shares
        .checked_mul(state.total_stable_pool)
        .map(|v| v / state.stable_pool_shares)
        .unwrap_or(u128::MAX);
    if gross > deposit {
        return Err(ProtocolError::InsufficientShares { requested: gross, available: deposit });
    }

    let fee = pool_fee(state.config().pool_fee_bps, gross);
    let net = gross - fee;

    // ══════════════ MUTATION BOUNDARY ══════════════
    // gross <= deposit <= total_stable_pool and the share burn is
    // bounded by the conversion above, so the subtractions cannot
    // underflow.

    state.account_mut(caller).stable_pool_deposit -= gross;
    state.total_stable_pool -= gross;
    state.stable_pool_shares -= shares;
    state.accrue_fee(fee);
    state.credit_balance(caller, net);

    state.emit(ProtocolEvent::StablePoolWithdrawn { withdrawer: caller, shares, gross, fee });
    tracing::info!("stable pool withdrawal by {}: shares {}, gross {}, fee {}", caller, shares, gross, fee);
    Ok(net)
}
