//! Instructions of the escrow program.
//!
//! The program is an Anchor program: instruction data starts with the 8 byte
//! discriminator `sha256("global:<name>")[..8]` followed by the Borsh encoded
//! arguments. Borsh encodes integers as fixed width little endian and options
//! with an explicit presence byte, so an absent partner can never be confused
//! with a zeroed key.
//!
//! The builders take the validated forms of the requests, so every instruction
//! built here describes a trade that passed the consistency checks.

use {
    crate::{
        pda::EscrowAddresses,
        trade_validation::{ValidatedCancel, ValidatedCreate, ValidatedExchange},
    },
    borsh::{BorshDeserialize, BorshSerialize},
    model::{OrderId, Pubkey},
    sha2::{Digest, Sha256},
    solana_sdk::{
        instruction::{AccountMeta, Instruction},
        sysvar,
    },
    solana_system_interface::program as system_program,
    std::io::{self, Write},
};

pub const CREATE_TRADE: &str = "create_trade";
pub const EXCHANGE: &str = "exchange";
pub const CANCEL: &str = "cancel";

/// Anchor's instruction discriminator for the method `name`.
pub fn discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{name}").as_bytes());
    let mut discriminator = [0; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CreateTradeArgs {
    pub order_id: OrderId,
    pub specified_partner: Option<Pubkey>,
    pub trade_value: u64,
    pub receive_value: u64,
    pub timestamp: u64,
    pub vault_bump: u8,
}

impl BorshSerialize for CreateTradeArgs {
    fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.order_id.serialize(writer)?;
        self.specified_partner
            .map(|partner| partner.to_bytes())
            .serialize(writer)?;
        self.trade_value.serialize(writer)?;
        self.receive_value.serialize(writer)?;
        self.timestamp.serialize(writer)?;
        self.vault_bump.serialize(writer)
    }
}

impl BorshDeserialize for CreateTradeArgs {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            order_id: u64::deserialize_reader(reader)?,
            specified_partner: Option::<[u8; 32]>::deserialize_reader(reader)?
                .map(Pubkey::new_from_array),
            trade_value: u64::deserialize_reader(reader)?,
            receive_value: u64::deserialize_reader(reader)?,
            timestamp: u64::deserialize_reader(reader)?,
            vault_bump: u8::deserialize_reader(reader)?,
        })
    }
}

/// Arguments shared by `exchange` and `cancel`. The program re-derives both
/// escrow addresses from them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct SettleArgs {
    pub order_id: OrderId,
    pub state_bump: u8,
    pub vault_bump: u8,
}

impl SettleArgs {
    fn new(order_id: OrderId, addresses: &EscrowAddresses) -> Self {
        Self {
            order_id,
            state_bump: addresses.state.bump,
            vault_bump: addresses.vault.bump,
        }
    }
}

fn instruction_data(name: &str, args: &impl BorshSerialize) -> Vec<u8> {
    let mut data = discriminator(name).to_vec();
    args.serialize(&mut data)
        .expect("writing into a vec never fails");
    data
}

/// Opens the escrow: creates the state account, initializes the vault and
/// moves the offered value into it.
///
/// Accounts:
/// 0. `[writable]` escrow state
/// 1. `[writable]` escrow vault
/// 2. `[writable, signer]` creator
/// 3. `[writable]` creator send account
/// 4. `[writable]` creator receive account
/// 5. `[writable]` fee account
/// 6. `[]` system program
/// 7. `[]` token program
/// 8. `[]` rent sysvar
/// 9. `[writable]` trade mint, if the creator offers a token
/// 10. `[writable]` receive mint, if the creator requests a token
pub fn create_trade(
    program_id: Pubkey,
    fee_account: Pubkey,
    order: &ValidatedCreate<'_>,
    addresses: &EscrowAddresses,
) -> Instruction {
    let request = order.request();
    let mut accounts = vec![
        AccountMeta::new(addresses.state.address, false),
        AccountMeta::new(addresses.vault.address, false),
        AccountMeta::new(request.creator, true),
        AccountMeta::new(request.creator_send_account, false),
        AccountMeta::new(request.creator_receive_account, false),
        AccountMeta::new(fee_account, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(spl_token::ID, false),
        AccountMeta::new_readonly(sysvar::rent::ID, false),
    ];
    accounts.extend(order.trade().mints().map(|mint| AccountMeta::new(mint, false)));

    let args = CreateTradeArgs {
        order_id: request.order_id,
        specified_partner: request.specified_partner,
        trade_value: request.trade_value,
        receive_value: request.receive_value,
        timestamp: request.timestamp,
        vault_bump: addresses.vault.bump,
    };
    Instruction {
        program_id,
        accounts,
        data: instruction_data(CREATE_TRADE, &args),
    }
}

/// Settles the escrow: the partner pays the creator and receives the vault.
///
/// Accounts:
/// 0. `[writable]` escrow state
/// 1. `[writable]` escrow vault
/// 2. `[writable]` creator receive account
/// 3. `[writable]` partner send account
/// 4. `[writable]` partner receive account
/// 5. `[writable]` creator
/// 6. `[writable, signer]` partner
/// 7. `[]` system program
/// 8. `[]` token program
pub fn exchange(
    program_id: Pubkey,
    settlement: &ValidatedExchange<'_>,
    addresses: &EscrowAddresses,
) -> Instruction {
    let info = settlement.info();
    let partner = settlement.partner();
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(addresses.state.address, false),
            AccountMeta::new(addresses.vault.address, false),
            AccountMeta::new(info.creator_receive_account, false),
            AccountMeta::new(partner.partner_send_account, false),
            AccountMeta::new(partner.partner_receive_account, false),
            AccountMeta::new(info.creator, false),
            AccountMeta::new(partner.partner, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: instruction_data(EXCHANGE, &SettleArgs::new(info.order_id, addresses)),
    }
}

/// Refunds the vault to the creator's send account.
///
/// Accounts:
/// 0. `[writable]` escrow state
/// 1. `[writable]` escrow vault
/// 2. `[writable]` creator send account
/// 3. `[writable, signer]` creator
/// 4. `[]` system program
/// 5. `[]` token program
pub fn cancel(
    program_id: Pubkey,
    cancellation: &ValidatedCancel<'_>,
    addresses: &EscrowAddresses,
) -> Instruction {
    let request = cancellation.request();
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(addresses.state.address, false),
            AccountMeta::new(addresses.vault.address, false),
            AccountMeta::new(request.creator_send_account, false),
            AccountMeta::new(request.creator, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: instruction_data(CANCEL, &SettleArgs::new(request.order_id, addresses)),
    }
}
