//! # Fee Distribution
//!
//! Routes accumulated protocol fees into the three reserve funds.
//!
//! ## Economic Invariant
//!
//! `FundSplit` guarantees
//! `insurance + development + marketing == collected amount`.
//! The insurance fund absorbs the integer-division remainder.

use democoin_common::constants::FUND_TOTAL_PERCENT;
use democoin_common::gate::Capability;
use democoin_common::{Address, ProtocolConfig, ProtocolError};

use crate::events::ProtocolEvent;
use crate::state::ProtocolState;

/// One fee distribution, split across the reserve funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundSplit {
    pub insurance: u128,
    pub development: u128,
    pub marketing: u128,
}

impl FundSplit {
    /// Splits `amount` by the configured percentages. The development
    /// and marketing shares truncate; insurance takes its own share
    /// plus the remainder, so the sum always equals `amount` exactly.
    #[must_use]
    pub fn compute(amount: u128, config: &ProtocolConfig) -> Self {
        let development = amount
            .checked_mul(config.development_percent)
            .and_then(|v| v.checked_div(FUND_TOTAL_PERCENT))
            .unwrap_or(0);
        let marketing = amount
            .checked_mul(config.marketing_percent)
            .and_then(|v| v.checked_div(FUND_TOTAL_PERCENT))
            .unwrap_or(0);

        // Insurance absorbs the remainder to guarantee sum == amount.
        let insurance = amount - development - marketing;

        debug_assert_eq!(
            insurance + development + marketing,
            amount,
            "fund split invariant violated"
        );

        Self { insurance, development, marketing }
    }

    #[must_use]
    pub fn total(&self) -> u128 {
        self.insurance + self.development + self.marketing
    }
}

/// Distributes the full `pending_fees` balance. Admin-only. A zero
/// balance is a no-op, not a fault (and emits nothing). Returns the
/// applied split.
pub fn handle_collect_fees(
    state: &mut ProtocolState,
    caller: Address,
) -> Result<FundSplit, ProtocolError> {
    state.authorize(&caller, Capability::AdminControl)?;

    let pending = state.pending_fees();
    if pending == 0 {
        return Ok(FundSplit { insurance: 0, development: 0, marketing: 0 });
    }

    let split = FundSplit::compute(pending, state.config());
    state.apply_fund_split(&split);

    state.emit(ProtocolEvent::FeesCollected {
        insurance: split.insurance,
        development: split.development,
        marketing: split.marketing,
    });
    tracing::info!(
        "fees collected: {} → insurance {}, development {}, marketing {}",
        pending, split.insurance, split.development, split.marketing
    );
    Ok(split)
}
