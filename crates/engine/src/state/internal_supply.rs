//! Supply primitives. `mint_supply` is the single path through which
//! tokens come into existence — admin mints and mining rewards both go
//! through it, so the supply cap is enforced in exactly one place.

use democoin_common::{Address, ProtocolError};

use super::ProtocolState;

impl ProtocolState {
    /// Remaining mintable amount under the cap.
    pub fn supply_headroom(&self) -> u128 {
        self.config.max_supply.saturating_sub(self.total_supply)
    }

    /// Credits `target` and grows total supply atomically. Fails with
    /// `SupplyCapExceeded` before any mutation if the cap would be
    /// crossed. Zero amounts are the caller's concern.
    pub(crate) fn mint_supply(&mut self, target: Address, amount: u128) -> Result<(), ProtocolError> {
        let headroom = self.supply_headroom();
        if amount > headroom {
            return Err(ProtocolError::SupplyCapExceeded { requested: amount, headroom });
        }
        self.total_supply += amount;
        self.credit_balance(target, amount);
        Ok(())
    }

    /// Debits `target` and shrinks total supply atomically. Fails with
    /// `InsufficientBalance` before any mutation.
    pub(crate) fn burn_supply(&mut self, target: Address, amount: u128) -> Result<(), ProtocolError> {
        self.debit_balance(target, amount)?;
        self.total_supply = self.total_supply.saturating_sub(amount);
        Ok(())
    }
}
