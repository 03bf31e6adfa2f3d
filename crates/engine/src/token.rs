//! # Token Ledger Handlers
//!
//! Admin mint and burn. Both run the gate first, then delegate to the
//! supply primitives so the cap invariant is enforced in one place.

use democoin_common::gate::Capability;
use democoin_common::{Address, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// Mints `amount` to `target`. Admin-only; rejects zero amounts and
/// anything that would cross the supply cap. Atomic: the balance and
/// `total_supply` move together or not at all.
pub fn handle_mint(
    state: &mut ProtocolState,
    caller: Address,
    target: Address,
    amount: u128,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    if amount == 0 {
        return Err(ProtocolError::ZeroAmount);
    }
    state.mint_supply(target, amount)?;

    let total_supply = state.total_supply();
    state.emit(ProtocolEvent::Minted { target, amount, total_supply });
    tracing::info!("minted {} to {}, total supply {}", amount, target, total_supply);
    Ok(())
}

/// Burns `amount` from `target`. Admin-only; rejects zero amounts and
/// balances that are short. Burning offsets minting in the price
/// controller's growth computation.
pub fn handle_burn(
    state: &mut ProtocolState,
    caller: Address,
    target: Address,
    amount: u128,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    if amount == 0 {
        return Err(ProtocolError::ZeroAmount);
    }
    state.burn_supply(target, amount)?;

    let total_supply = state.total_supply();
    state.emit(ProtocolEvent::Burned { target, amount, total_supply });
    tracing::info!("burned {} from {}, total supply {}", amount, target, total_supply);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use democoin_common::constants::ONE;
    use democoin_common::{ProtocolConfig, Role};

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn state() -> ProtocolState {
        ProtocolState::new(ProtocolConfig::default(), addr(1))
    }

    #[test]
    fn mint_requires_admin() {
        let mut s = state();
        assert_eq!(
            handle_mint(&mut s, addr(2), addr(2), ONE),
            Err(ProtocolError::Unauthorized { required: Role::Admin })
        );
    }

    #[test]
    fn mint_rejects_zero_amount() {
        let mut s = state();
        assert_eq!(handle_mint(&mut s, addr(1), addr(2), 0), Err(ProtocolError::ZeroAmount));
    }

    #[test]
    fn mint_emits_event_with_new_supply() {
        let mut s = state();
        handle_mint(&mut s, addr(1), addr(2), 1_000 * ONE).unwrap();
        assert_eq!(
            s.take_events(),
            vec![ProtocolEvent::Minted {
                target: addr(2),
                amount: 1_000 * ONE,
                total_supply: 1_000 * ONE,
            }]
        );
    }

    #[test]
    fn mint_beyond_cap_fails_with_supply_cap_exceeded() {
        let mut s = state();
        let max = s.max_supply();
        handle_mint(&mut s, addr(1), addr(2), 1_000_000 * ONE).unwrap();
        let err = handle_mint(&mut s, addr(1), addr(2), max).unwrap_err();
        assert!(matches!(err, ProtocolError::SupplyCapExceeded { .. }));
        assert_eq!(s.total_supply(), 1_000_000 * ONE);
    }

    #[test]
    fn burn_reduces_supply() {
        let mut s = state();
        handle_mint(&mut s, addr(1), addr(2), 1_000).unwrap();
        handle_burn(&mut s, addr(1), addr(2), 400).unwrap();
        assert_eq!(s.total_supply(), 600);
        assert_eq!(s.balance_of(&addr(2)), 600);
    }

    #[test]
    fn admin_mint_works_during_emergency() {
        // Emergency mode gates value-moving user operations, not the
        // admin controls themselves.
        let mut s = state();
        crate::gate::handle_set_emergency_mode(&mut s, addr(1), true).unwrap();
        handle_mint(&mut s, addr(1), addr(2), 1_000 * ONE).unwrap();
        assert_eq!(s.balance_of(&addr(2)), 1_000 * ONE);
    }
}
