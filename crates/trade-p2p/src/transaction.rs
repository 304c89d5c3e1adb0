use {
    crate::{error::TradeError, ledger::LedgerQuerying},
    model::Pubkey,
    solana_sdk::{instruction::Instruction, transaction::Transaction},
};

/// An unsigned transaction ready to be handed to the signers.
///
/// The signature slots are zeroed placeholders, one per required signer.
/// Signing fills them in place without touching the serialized message.
#[derive(Clone, Debug)]
pub struct FinalizedTransaction {
    transaction: Transaction,
    fee_payer: Pubkey,
    bytes: Vec<u8>,
}

impl FinalizedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn fee_payer(&self) -> Pubkey {
        self.fee_payer
    }

    /// Wire encoding of the transaction.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }
}

/// The first account flagged as signer across the instructions.
pub fn fee_payer(instructions: &[Instruction]) -> Result<Pubkey, TradeError> {
    instructions
        .iter()
        .flat_map(|instruction| &instruction.accounts)
        .find(|meta| meta.is_signer)
        .map(|meta| meta.pubkey)
        .ok_or(TradeError::NoSignerFound)
}

/// Stamps the instructions with a recent blockhash and fee payer and
/// serializes the resulting transaction.
pub async fn finalize(
    ledger: &dyn LedgerQuerying,
    instructions: &[Instruction],
) -> Result<FinalizedTransaction, TradeError> {
    let payer = fee_payer(instructions)?;
    let blockhash = ledger
        .latest_blockhash()
        .await
        .map_err(TradeError::FreshnessLookupFailed)?;

    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer));
    transaction.message.recent_blockhash = blockhash;
    let bytes = bincode::serialize(&transaction)?;
    tracing::debug!(%payer, %blockhash, size = bytes.len(), "finalized transaction");
    Ok(FinalizedTransaction {
        transaction,
        fee_payer: payer,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::ledger::MockLedgerQuerying,
        anyhow::anyhow,
        solana_sdk::{
            hash::Hash,
            instruction::AccountMeta,
            signature::{Keypair, Signature, Signer},
        },
    };

    fn instruction(accounts: Vec<AccountMeta>) -> Instruction {
        Instruction {
            program_id: Pubkey::new_unique(),
            accounts,
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn first_signer_pays() {
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let instructions = [
            instruction(vec![AccountMeta::new(Pubkey::new_unique(), false)]),
            instruction(vec![
                AccountMeta::new(Pubkey::new_unique(), false),
                AccountMeta::new(first, true),
                AccountMeta::new_readonly(second, true),
            ]),
        ];
        assert_eq!(fee_payer(&instructions).unwrap(), first);
    }

    #[tokio::test]
    async fn no_signer() {
        let mut ledger = MockLedgerQuerying::new();
        ledger.expect_latest_blockhash().never();

        let instructions = [instruction(vec![AccountMeta::new(Pubkey::new_unique(), false)])];
        assert!(matches!(
            finalize(&ledger, &instructions).await,
            Err(TradeError::NoSignerFound)
        ));
        assert!(matches!(
            finalize(&ledger, &[]).await,
            Err(TradeError::NoSignerFound)
        ));
    }

    #[tokio::test]
    async fn blockhash_failure() {
        let mut ledger = MockLedgerQuerying::new();
        ledger
            .expect_latest_blockhash()
            .returning(|| Err(anyhow!("node is behind")));

        let instructions = [instruction(vec![AccountMeta::new(Pubkey::new_unique(), true)])];
        assert!(matches!(
            finalize(&ledger, &instructions).await,
            Err(TradeError::FreshnessLookupFailed(_))
        ));
    }

    #[tokio::test]
    async fn serializes_unsigned_transaction() {
        let blockhash = Hash::new_from_array([7; 32]);
        let mut ledger = MockLedgerQuerying::new();
        ledger
            .expect_latest_blockhash()
            .times(1)
            .returning(move || Ok(blockhash));

        let signer = Keypair::new();
        let instructions = [instruction(vec![
            AccountMeta::new(Pubkey::new_unique(), false),
            AccountMeta::new(signer.pubkey(), true),
        ])];
        let finalized = finalize(&ledger, &instructions).await.unwrap();

        assert_eq!(finalized.fee_payer(), signer.pubkey());
        assert_eq!(
            finalized.transaction().message.account_keys[0],
            signer.pubkey()
        );
        assert_eq!(finalized.transaction().message.recent_blockhash, blockhash);
        assert_eq!(finalized.transaction().signatures, vec![Signature::default()]);
        assert!(!finalized.transaction().is_signed());

        let decoded: Transaction = bincode::deserialize(finalized.bytes()).unwrap();
        assert_eq!(&decoded, finalized.transaction());

        // Signatures are attached later against the unchanged message.
        let mut transaction = finalized.into_transaction();
        let message = transaction.message_data();
        transaction.partial_sign(&[&signer], blockhash);
        assert!(transaction.is_signed());
        assert_eq!(transaction.message_data(), message);
    }
}
