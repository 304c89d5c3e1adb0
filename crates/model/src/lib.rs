//! Contains the models shared between the escrow client and its callers.

pub mod order;
pub mod trade;

pub use solana_sdk::pubkey::Pubkey;

/// Identifier chosen by the creator for one escrow. Together with the
/// creator's identity it is the unique key of an order.
pub type OrderId = u64;
