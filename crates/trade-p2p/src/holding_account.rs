//! Classification of the accounts a participant trades with.
//!
//! A token side of a trade moves through an SPL token account of the right
//! mint and owner. A native side moves through the participant's own account,
//! so for native value the "holding account" is the owner's identity itself.

use {
    crate::{error::TradeError, ledger::LedgerQuerying},
    anyhow::anyhow,
    model::Pubkey,
    spl_token::{solana_program::program_pack::Pack, state::Account as TokenAccount},
};

/// Checks whether `account` is an SPL token account holding `expected_mint`
/// and owned by `expected_owner`.
///
/// Accounts that do not exist or that are not owned by the token program are
/// not holding accounts. The ledger is queried on every call, results must
/// not be reused across operations.
pub async fn is_holding_account(
    ledger: &dyn LedgerQuerying,
    account: Pubkey,
    expected_owner: Pubkey,
    expected_mint: Option<Pubkey>,
) -> Result<bool, TradeError> {
    if expected_mint.is_none() && account == expected_owner {
        return Ok(false);
    }

    let record = ledger
        .account(account)
        .await
        .map_err(|source| TradeError::AccountLookupFailed { account, source })?;
    let Some(record) = record else {
        tracing::debug!(%account, "account does not exist");
        return Ok(false);
    };
    if record.owner != spl_token::ID {
        tracing::debug!(%account, owner = %record.owner, "not a token program account");
        return Ok(false);
    }

    let token_account = TokenAccount::unpack_unchecked(&record.data).map_err(|err| {
        TradeError::AccountLookupFailed {
            account,
            source: anyhow!("malformed token account: {err}"),
        }
    })?;
    let is_holding =
        Some(token_account.mint) == expected_mint && token_account.owner == expected_owner;
    tracing::debug!(
        %account,
        mint = %token_account.mint,
        owner = %token_account.owner,
        is_holding,
        "classified token account"
    );
    Ok(is_holding)
}
