//! Bounded in-memory log of transactions this client submitted
//!
//! Nothing here is authoritative; the chain is. The history exists so an
//! operator can ask "what did this process send" without a block explorer.

use chrono::{DateTime, Utc};
use ethers::types::{TxHash, U256};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Propose,
    Vote,
    Queue,
    Execute,
    Delegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Confirmed,
    Reverted,
}

#[derive(Debug, Clone, Serialize)]
pub struct TxRecord {
    pub kind: TxKind,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: U256,
    pub status: TxStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct TxHistory {
    records: VecDeque<TxRecord>,
    capacity: usize,
}

impl TxHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn push(&mut self, record: TxRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Most recent `limit` records, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<TxRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(block: u64) -> TxRecord {
        TxRecord {
            kind: TxKind::Vote,
            tx_hash: TxHash::from_low_u64_be(block),
            block_number: block,
            gas_used: U256::from(21_000u64),
            status: TxStatus::Confirmed,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_push_and_recent() {
        let mut history = TxHistory::new(10);
        assert!(history.is_empty());

        for block in 1..=5 {
            history.push(record(block));
        }
        assert_eq!(history.len(), 5);

        let last_two = history.recent(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].block_number, 4);
        assert_eq!(last_two[1].block_number, 5);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = TxHistory::new(3);
        for block in 1..=5 {
            history.push(record(block));
        }
        assert_eq!(history.len(), 3);
        let all = history.recent(10);
        assert_eq!(all[0].block_number, 3);
        assert_eq!(all[2].block_number, 5);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut history = TxHistory::new(0);
        history.push(record(1));
        history.push(record(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.recent(1)[0].block_number, 2);
    }
}
