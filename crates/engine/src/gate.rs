//! # Engine-Side Gate
//!
//! Bridges the pure capability evaluation in `democoin_common::gate`
//! into engine state: role lookups, the per-call authorization snapshot,
//! and the governance handlers (pause, unpause, emergency toggle, miner
//! role management).
//!
//! Every mutating handler in this crate starts with
//! `state.authorize(caller, capability)` — the single access-control
//! check — and touches no state before it passes.

use democoin_common::gate::{authorize, Capability, GateContext};
use democoin_common::{Address, ProtocolError, Role};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

impl ProtocolState {
    pub fn has_role(&self, addr: &Address, role: Role) -> bool {
        self.roles.get(addr).map(|set| set.contains(&role)).unwrap_or(false)
    }

    /// The uniform access check: snapshot the caller's standing and
    /// evaluate the capability. Read-only.
    pub(crate) fn authorize(&self, caller: &Address, cap: Capability) -> Result<(), ProtocolError> {
        let ctx = GateContext {
            paused: self.paused,
            emergency_mode: self.emergency_mode,
            is_admin: self.has_role(caller, Role::Admin),
            is_miner: self.has_role(caller, Role::Miner),
        };
        authorize(&ctx, cap)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GOVERNANCE HANDLERS
// ════════════════════════════════════════════════════════════════════════════

/// Pauses the protocol. Admin-only. Idempotent: pausing an already
/// paused engine changes nothing and emits nothing.
pub fn handle_pause(state: &mut ProtocolState, caller: Address) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    if !state.paused {
        state.paused = true;
        state.emit(ProtocolEvent::Paused);
        tracing::info!("protocol paused by {}", caller);
    }
    Ok(())
}

/// Unpauses the protocol. Admin-only, idempotent.
pub fn handle_unpause(state: &mut ProtocolState, caller: Address) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    if state.paused {
        state.paused = false;
        state.emit(ProtocolEvent::Unpaused);
        tracing::info!("protocol unpaused by {}", caller);
    }
    Ok(())
}

/// Toggles the emergency circuit breaker. Admin-only, idempotent.
/// Balances are never touched — the flag only gates new value-moving
/// mutations.
pub fn handle_set_emergency_mode(
    state: &mut ProtocolState,
    caller: Address,
    enabled: bool,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    if state.emergency_mode != enabled {
        state.emergency_mode = enabled;
        if enabled {
            state.emit(ProtocolEvent::EmergencyModeActivated);
            tracing::warn!("emergency mode activated by {}", caller);
        } else {
            state.emit(ProtocolEvent::EmergencyModeDeactivated);
            tracing::info!("emergency mode deactivated by {}", caller);
        }
    }
    Ok(())
}

/// Grants the miner role. Admin-only, idempotent.
pub fn handle_grant_miner_role(
    state: &mut ProtocolState,
    caller: Address,
    miner: Address,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    let inserted = state.roles.entry(miner).or_default().insert(Role::Miner);
    if inserted {
        state.emit(ProtocolEvent::MinerRoleGranted { miner });
        tracing::info!("miner role granted to {}", miner);
    }
    Ok(())
}

/// Revokes the miner role. Admin-only, idempotent. The miner's record
/// and accumulated hash power survive revocation.
pub fn handle_revoke_miner_role(
    state: &mut ProtocolState,
    caller: Address,
    miner: Address,
) -> Result<(), ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;
    let removed = state.roles.get_mut(&miner).map(|set| set.remove(&Role::Miner)).unwrap_or(false);
    if removed {
        state.emit(ProtocolEvent::MinerRoleRevoked { miner });
        tracing::info!("miner role revoked from {}", miner);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use democoin_common::ProtocolConfig;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn state() -> ProtocolState {
        ProtocolState::new(ProtocolConfig::default(), addr(1))
    }

    #[test]
    fn non_admin_cannot_pause_or_toggle_emergency() {
        let mut s = state();
        assert_eq!(
            handle_pause(&mut s, addr(2)),
            Err(ProtocolError::Unauthorized { required: Role::Admin })
        );
        assert_eq!(
            handle_set_emergency_mode(&mut s, addr(2), true),
            Err(ProtocolError::Unauthorized { required: Role::Admin })
        );
        assert!(!s.is_paused());
        assert!(!s.is_emergency_mode());
    }

    #[test]
    fn pause_round_trip_is_idempotent() {
        let mut s = state();
        handle_pause(&mut s, addr(1)).unwrap();
        handle_pause(&mut s, addr(1)).unwrap();
        assert!(s.is_paused());
        // Only one event despite two calls.
        assert_eq!(s.take_events(), vec![ProtocolEvent::Paused]);

        handle_unpause(&mut s, addr(1)).unwrap();
        assert!(!s.is_paused());
        assert_eq!(s.take_events(), vec![ProtocolEvent::Unpaused]);
    }

    #[test]
    fn admin_can_act_while_paused() {
        let mut s = state();
        handle_pause(&mut s, addr(1)).unwrap();
        handle_set_emergency_mode(&mut s, addr(1), true).unwrap();
        handle_set_emergency_mode(&mut s, addr(1), false).unwrap();
        handle_unpause(&mut s, addr(1)).unwrap();
    }

    #[test]
    fn miner_role_grant_revoke_round_trip() {
        let mut s = state();
        handle_grant_miner_role(&mut s, addr(1), addr(5)).unwrap();
        assert!(s.has_role(&addr(5), Role::Miner));

        // Granting twice emits once.
        handle_grant_miner_role(&mut s, addr(1), addr(5)).unwrap();
        assert_eq!(
            s.take_events(),
            vec![ProtocolEvent::MinerRoleGranted { miner: addr(5) }]
        );

        handle_revoke_miner_role(&mut s, addr(1), addr(5)).unwrap();
        assert!(!s.has_role(&addr(5), Role::Miner));
    }
}
