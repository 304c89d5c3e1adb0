//! Ledger fixtures shared by the unit tests and downstream crates.

use {
    crate::ledger::MockLedgerQuerying,
    model::Pubkey,
    solana_sdk::{account::Account, hash::Hash},
    solana_system_interface::program as system_program,
    spl_token::{
        solana_program::program_pack::Pack,
        state::{Account as TokenAccount, AccountState},
    },
    std::collections::HashMap,
};

/// The blockhash served by [`ledger_with`].
pub fn blockhash() -> Hash {
    Hash::new_from_array([7; 32])
}

/// An initialized SPL token account holding `mint` on behalf of `owner`.
pub fn token_account(mint: Pubkey, owner: Pubkey) -> Account {
    let state = TokenAccount {
        mint,
        owner,
        amount: 1_000,
        state: AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0; TokenAccount::LEN];
    TokenAccount::pack(state, &mut data).unwrap();
    Account {
        lamports: 2_039_280,
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// A plain wallet owned by the system program.
pub fn system_account() -> Account {
    Account {
        lamports: 1_000_000_000,
        data: Vec::new(),
        owner: system_program::ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// A ledger serving the given accounts and [`blockhash`]. Addresses not in
/// the map do not exist.
pub fn ledger_with(accounts: HashMap<Pubkey, Account>) -> MockLedgerQuerying {
    let mut ledger = MockLedgerQuerying::new();
    ledger
        .expect_account()
        .returning(move |address| Ok(accounts.get(&address).cloned()));
    ledger
        .expect_latest_blockhash()
        .returning(|| Ok(blockhash()));
    ledger
}
