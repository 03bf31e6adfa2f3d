//! Fee accrual and reserve-fund primitives. Fees accumulate in
//! `pending_fees` until an admin distributes them; the funds only ever
//! grow (nothing in the protocol spends them).

use super::ProtocolState;
use crate::fees::FundSplit;

impl ProtocolState {
    pub fn pending_fees(&self) -> u128 {
        self.pending_fees
    }

    /// `(insurance, development, marketing)` reserve balances.
    pub fn fund_balances(&self) -> (u128, u128, u128) {
        (self.insurance_fund, self.development_fund, self.marketing_fund)
    }

    pub(crate) fn accrue_fee(&mut self, amount: u128) {
        self.pending_fees = self.pending_fees.saturating_add(amount);
    }

    /// Applies a computed split to the funds and zeroes the pending
    /// accumulator. Infallible (saturating) — callers compute the split
    /// from `pending_fees` itself, so the sum always fits.
    pub(crate) fn apply_fund_split(&mut self, split: &FundSplit) {
        self.insurance_fund = self.insurance_fund.saturating_add(split.insurance);
        self.development_fund = self.development_fund.saturating_add(split.development);
        self.marketing_fund = self.marketing_fund.saturating_add(split.marketing);
        self.pending_fees = 0;
    }
}
