//! Account table primitives: lookup, implicit creation, and balance
//! credit/debit. Handlers validate first and only then call the
//! mutating primitives, so a debit failure here means the handler
//! skipped its checks — debit still refuses rather than underflowing.

use democoin_common::{Address, ProtocolError};

use super::{Account, ProtocolState};

impl ProtocolState {
    /// Read-only account lookup. Absent means "never interacted" and is
    /// equivalent to an all-zero account.
    pub fn account(&self, addr: &Address) -> Option<&Account> {
        self.accounts.get(addr)
    }

    /// Account entry, created on first touch.
    pub(crate) fn account_mut(&mut self, addr: Address) -> &mut Account {
        self.accounts.entry(addr).or_default()
    }

    pub fn balance_of(&self, addr: &Address) -> u128 {
        self.accounts.get(addr).map(|a| a.token_balance).unwrap_or(0)
    }

    pub fn stable_pool_balance_of(&self, addr: &Address) -> u128 {
        self.accounts.get(addr).map(|a| a.stable_pool_deposit).unwrap_or(0)
    }

    pub fn collateral_of(&self, addr: &Address) -> u128 {
        self.accounts.get(addr).map(|a| a.collateral_deposit).unwrap_or(0)
    }

    /// Credits a token balance. Saturating: with supply capped far
    /// below `u128::MAX`, saturation is unreachable.
    pub(crate) fn credit_balance(&mut self, addr: Address, amount: u128) {
        let account = self.account_mut(addr);
        account.token_balance = account.token_balance.saturating_add(amount);
    }

    /// Debits a token balance, failing with `InsufficientBalance` when
    /// short. No partial debit.
    pub(crate) fn debit_balance(&mut self, addr: Address, amount: u128) -> Result<(), ProtocolError> {
        let available = self.balance_of(&addr);
        if available < amount {
            return Err(ProtocolError::InsufficientBalance { required: amount, available });
        }
        self.account_mut(addr).token_balance = available - amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use democoin_common::ProtocolConfig;

    fn state() -> ProtocolState {
        ProtocolState::new(ProtocolConfig::default(), Address::from_bytes([1; 20]))
    }

    #[test]
    fn unknown_account_reads_as_zero() {
        let s = state();
        let addr = Address::from_bytes([9; 20]);
        assert!(s.account(&addr).is_none());
        assert_eq!(s.balance_of(&addr), 0);
        assert_eq!(s.stable_pool_balance_of(&addr), 0);
        assert_eq!(s.collateral_of(&addr), 0);
    }

    #[test]
    fn credit_then_debit_round_trips() {
        let mut s = state();
        let addr = Address::from_bytes([9; 20]);
        s.credit_balance(addr, 100);
        assert_eq!(s.balance_of(&addr), 100);
        s.debit_balance(addr, 60).unwrap();
        assert_eq!(s.balance_of(&addr), 40);
    }

    #[test]
    fn debit_refuses_to_underflow() {
        let mut s = state();
        let addr = Address::from_bytes([9; 20]);
        s.credit_balance(addr, 10);
        let err = s.debit_balance(addr, 11).unwrap_err();
        assert_eq!(err, ProtocolError::InsufficientBalance { required: 11, available: 10 });
        // Balance untouched after the failed debit.
        assert_eq!(s.balance_of(&addr), 10);
    }
}
