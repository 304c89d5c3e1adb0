//! Derivation of an order's escrow addresses.
//!
//! Both addresses are program derived addresses seeded with
//! `[tag, creator, order_id as u64 little endian]`, so anyone who knows the
//! creator and the order id can locate the escrow without storing anything.

use {
    crate::error::TradeError,
    model::{OrderId, Pubkey},
};

pub const STATE_SEED: &[u8] = b"state";
pub const VAULT_SEED: &[u8] = b"vault";

/// Namespace tag of an escrow address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EscrowSeed {
    /// The record tracking the order's lifecycle.
    State,
    /// The account holding the offered value until settlement or refund.
    Vault,
}

impl EscrowSeed {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::State => STATE_SEED,
            Self::Vault => VAULT_SEED,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProgramAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Finds the program address for `seed` of the order `(creator, order_id)`.
pub fn derive(
    program_id: &Pubkey,
    seed: EscrowSeed,
    creator: &Pubkey,
    order_id: OrderId,
) -> Result<ProgramAddress, TradeError> {
    Pubkey::try_find_program_address(
        &[seed.as_bytes(), creator.as_ref(), &order_id.to_le_bytes()],
        program_id,
    )
    .map(|(address, bump)| ProgramAddress { address, bump })
    .ok_or(TradeError::DerivationExhausted)
}

/// State and vault addresses of one order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EscrowAddresses {
    pub state: ProgramAddress,
    pub vault: ProgramAddress,
}

impl EscrowAddresses {
    pub fn derive(
        program_id: &Pubkey,
        creator: &Pubkey,
        order_id: OrderId,
    ) -> Result<Self, TradeError> {
        let addresses = Self {
            state: derive(program_id, EscrowSeed::State, creator, order_id)?,
            vault: derive(program_id, EscrowSeed::Vault, creator, order_id)?,
        };
        tracing::debug!(
            %creator,
            order_id,
            state = %addresses.state.address,
            vault = %addresses.vault.address,
            "derived escrow addresses"
        );
        Ok(addresses)
    }
}
