//! # Collateral Vault
//!
//! Collateral deposits and the over-collateralized borrow-limit
//! computation. The vault only accounts: actual borrowing settlement is
//! the embedding client's concern, the engine bounds what it may lend.
//!
//! Rounding policy: the collateral ratio rounds half-up (documented,
//! fixed); the borrow limit truncates only at the final division.

use democoin_common::gate::Capability;
use democoin_common::{Address, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// Locks `amount` of the caller's tokens as collateral.
pub fn handle_deposit_collateral(
    state: &mut ProtocolState,
    caller: Address,
    amount: u128,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::MoveValue)?;
    if amount == 0 {
        return Err(ProtocolError::ZeroAmount);
    }

    state.debit_balance(caller, amount)?;
    state.account_mut(caller).collateral_deposit += amount;
    state.total_collateral += amount;

    state.emit(ProtocolEvent::CollateralDeposited { depositor: caller, amount });
    tracing::info!("collateral deposit by {}: {}", caller, amount);
    Ok(())
}

/// Releases `amount` of collateral back to the caller's token balance.
pub fn handle_withdraw_collateral(
    state: &mut ProtocolState,
    caller: Address,
    amount: u128,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::MoveValue)?;
    if amount == 0 {
        return Err(ProtocolError::ZeroAmount);
    }

    let deposited = state.collateral_of(&caller);
    if amount > deposited {
        return Err(ProtocolError::InsufficientCollateral { requested: amount, available: deposited });
    }

    state.account_mut(caller).collateral_deposit -= amount;
    state.total_collateral -= amount;
    state.credit_balance(caller, amount);

    state.emit(ProtocolEvent::CollateralWithdrawn { withdrawer: caller, amount });
    tracing::info!("collateral withdrawal by {}: {}", caller, amount);
    Ok(())
}

/// System-wide collateralization as an integer percentage,
/// `round_half_up(total_collateral * 100 / total_supply)`. Zero supply
/// reads as `0` rather than faulting.
#[must_use]
pub fn collateral_ratio(state: &ProtocolState) -> u128 {
    let supply = state.total_supply();
    if supply == 0 {
        return 0;
    }
    state
        .total_collateral()
        .saturating_mul(100)
        .saturating_add(supply / 2)
        / supply
}

/// Borrow limit for `addr`: `collateral * 100 / collateral_factor`,
/// truncated only at the final division. With the 150% factor this is
/// exactly two-thirds of the deposited collateral.
#[must_use]
pub fn calculate_max_borrowable(state: &ProtocolState, addr: &Address) -> u128 {
    state
        .collateral_of(addr)
        .saturating_mul(100)
        / state.config().collateral_factor_percent
}
