//! Client side of a peer to peer escrow program.
//!
//! A creator locks the value they offer in a vault owned by the program. A
//! counter-party settles the order by paying the requested value, or the
//! creator cancels it and gets the vault refunded. This crate validates such
//! requests against the ledger and produces unsigned transactions for them.

pub mod client;
pub mod config;
pub mod error;
pub mod holding_account;
pub mod instruction;
pub mod ledger;
pub mod pda;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
pub mod trade_validation;
pub mod transaction;

pub use {
    client::TradeP2p,
    config::Configuration,
    error::TradeError,
    ledger::LedgerQuerying,
    transaction::FinalizedTransaction,
};
