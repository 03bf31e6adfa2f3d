//! Miner table primitives. The per-miner records and the network-wide
//! hash-power aggregate are updated in lock-step; the aggregate is a
//! standing invariant (`network_hash_power == Σ total_hash_power`), not
//! a cache.

use democoin_common::Address;

use super::{MinerRecord, ProtocolState};

impl ProtocolState {
    pub fn miner(&self, addr: &Address) -> Option<&MinerRecord> {
        self.miners.get(addr)
    }

    pub fn total_hash_power(&self, addr: &Address) -> u128 {
        self.miners.get(addr).map(|m| m.total_hash_power).unwrap_or(0)
    }

    /// Sum of all miners' hash power.
    pub fn network_hash_power(&self) -> u128 {
        self.network_hash_power
    }

    pub fn last_reward_time(&self, addr: &Address) -> Option<u64> {
        self.miners.get(addr).map(|m| m.last_reward_time)
    }

    /// Records an accepted proof: creates the record on first
    /// submission (which also starts the reward clock), bumps both the
    /// miner's power and the network aggregate, and stamps the
    /// submission time. Returns the miner's new cumulative power.
    pub(crate) fn record_accepted_proof(&mut self, miner: Address, power: u128, now: u64) -> u128 {
        let record = self.miners.entry(miner).or_insert(MinerRecord {
            total_hash_power: 0,
            last_submission_time: now,
            last_reward_time: now,
        });
        record.total_hash_power = record.total_hash_power.saturating_add(power);
        record.last_submission_time = now;
        let total = record.total_hash_power;

        self.network_hash_power = self.network_hash_power.saturating_add(power);
        total
    }
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
    fn first_accepted_proof_creates_the_record() {
        let mut s = state();
        let total = s.record_accepted_proof(addr(2), 10, 1_000);
        assert_eq!(total, 10);

        let rec = s.miner(&addr(2)).unwrap();
        assert_eq!(rec.last_submission_time, 1_000);
        assert_eq!(rec.last_reward_time, 1_000);
        assert_eq!(s.network_hash_power(), 10);
    }

    #[test]
    fn aggregate_tracks_all_miners() {
        let mut s = state();
        s.record_accepted_proof(addr(2), 10, 1_000);
        s.record_accepted_proof(addr(3), 10, 1_100);
        s.record_accepted_proof(addr(2), 10, 2_000);

        assert_eq!(s.total_hash_power(&addr(2)), 20);
        assert_eq!(s.total_hash_power(&addr(3)), 10);
        assert_eq!(s.network_hash_power(), 30);

        // Second submission does not reset the reward clock.
        assert_eq!(s.miner(&addr(2)).unwrap().last_reward_time, 1_000);
        assert_eq!(s.miner(&addr(2)).unwrap().last_submission_time, 2_000);
    }
}
