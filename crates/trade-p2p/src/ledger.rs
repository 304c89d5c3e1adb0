//! Read access to the ledger, abstracted so that components can be tested
//! against mocked account state.

use {
    anyhow::Result,
    model::Pubkey,
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_sdk::{account::Account, hash::Hash},
};

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait LedgerQuerying: Send + Sync {
    /// Fetches the current state of an account. Returns `None` if the account
    /// does not exist.
    async fn account(&self, address: Pubkey) -> Result<Option<Account>>;

    /// Fetches a recent blockhash that makes a transaction acceptable to the
    /// cluster for a limited time.
    async fn latest_blockhash(&self) -> Result<Hash>;
}

#[async_trait::async_trait]
impl LedgerQuerying for RpcClient {
    async fn account(&self, address: Pubkey) -> Result<Option<Account>> {
        let response = self
            .get_account_with_commitment(&address, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.get_latest_blockhash().await?)
    }
}
