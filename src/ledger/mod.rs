//! Per-address withdrawal cooldown ledger.
//!
//! # Data Flow
//! ```text
//! claim (atomic eligibility check + in-flight mark)
//!     → disbursement pipeline runs
//!     → commit on success (records the withdrawal time)
//!     → release on failure (restores the pre-claim record)
//! ```
//!
//! The claim itself holds no lock while the disbursement runs; the in-flight
//! mark is what keeps a second claim for the same address out. The ledger is
//! volatile: it lives for the process lifetime and is reset on restart.

use alloy::primitives::Address;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Per-address withdrawal state. One record per address that has ever
/// claimed a withdrawal; overwritten on commit, never appended.
#[derive(Debug, Clone, Copy)]
struct AccountRecord {
    last_withdraw: Option<Instant>,
    in_flight: bool,
}

/// Why a claim was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CooldownError {
    #[error("cooldown active for another {}s", remaining.as_secs())]
    Active { remaining: Duration },

    #[error("a withdrawal for this address is already in progress")]
    InProgress,
}

/// An exclusive, in-flight withdrawal slot for one address.
///
/// Obtained from [`CooldownLedger::claim`]; must be handed back via
/// [`CooldownLedger::commit`] or [`CooldownLedger::release`].
#[must_use = "a claim must be committed or released"]
#[derive(Debug)]
pub struct Claim {
    address: Address,
    previous: Option<Instant>,
}

impl Claim {
    /// The claimed address.
    pub fn address(&self) -> Address {
        self.address
    }
}

/// Concurrency-safe mapping from address to withdrawal record.
#[derive(Default)]
pub struct CooldownLedger {
    records: DashMap<Address, AccountRecord>,
}

impl CooldownLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Atomically check eligibility and mark `address` in flight.
    ///
    /// The check and the mark happen under the map's per-key entry lock, so
    /// exactly one of any number of concurrent claims for the same address
    /// succeeds; the rest observe either the in-flight mark or the recorded
    /// withdrawal time. An address with no record is always eligible.
    pub fn claim(
        &self,
        address: Address,
        window: Duration,
        now: Instant,
    ) -> Result<Claim, CooldownError> {
        match self.records.entry(address) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if record.in_flight {
                    return Err(CooldownError::InProgress);
                }
                if let Some(last) = record.last_withdraw {
                    let elapsed = now.saturating_duration_since(last);
                    if elapsed < window {
                        return Err(CooldownError::Active {
                            remaining: window - elapsed,
                        });
                    }
                }
                let previous = record.last_withdraw;
                record.in_flight = true;
                Ok(Claim { address, previous })
            }
            Entry::Vacant(vacant) => {
                vacant.insert(AccountRecord {
                    last_withdraw: None,
                    in_flight: true,
                });
                Ok(Claim {
                    address,
                    previous: None,
                })
            }
        }
    }

    /// Record a completed withdrawal for the claimed address.
    pub fn commit(&self, claim: Claim, now: Instant) {
        self.records.insert(
            claim.address,
            AccountRecord {
                last_withdraw: Some(now),
                in_flight: false,
            },
        );
    }

    /// Hand the claim back without recording anything. The pre-claim record
    /// is restored exactly; a failed disbursement never advances the clock.
    pub fn release(&self, claim: Claim) {
        match claim.previous {
            Some(last) => {
                self.records.insert(
                    claim.address,
                    AccountRecord {
                        last_withdraw: Some(last),
                        in_flight: false,
                    },
                );
            }
            None => {
                self.records.remove(&claim.address);
            }
        }
    }

    /// Pure eligibility read. An in-flight claim counts as ineligible.
    pub fn is_eligible(&self, address: Address, window: Duration, now: Instant) -> bool {
        match self.records.get(&address) {
            None => true,
            Some(record) => {
                if record.in_flight {
                    return false;
                }
                match record.last_withdraw {
                    None => true,
                    Some(last) => now.saturating_duration_since(last) >= window,
                }
            }
        }
    }

    /// Last recorded withdrawal time for `address`, if any.
    pub fn last_withdraw(&self, address: &Address) -> Option<Instant> {
        self.records.get(address).and_then(|record| record.last_withdraw)
    }

    /// Number of addresses with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no address has ever claimed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
