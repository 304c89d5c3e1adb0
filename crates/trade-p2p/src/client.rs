//! Entry point for creating, settling and cancelling escrow orders.
//!
//! Every operation validates the request against the ledger before anything
//! is built, so a returned transaction is always consistent with the state
//! the ledger reported at the time of the call.

use {
    crate::{
        config::Configuration,
        error::TradeError,
        holding_account::is_holding_account,
        instruction,
        ledger::LedgerQuerying,
        pda::EscrowAddresses,
        trade_validation::{
            self,
            RoleFlags,
            Trade,
            ValidatedCancel,
            ValidatedCreate,
            ValidatedExchange,
        },
        transaction::{self, FinalizedTransaction},
    },
    model::{
        OrderId,
        Pubkey,
        order::{CancelRequest, PartnerInfo, TradeInfo, TradeOrderRequest},
    },
    solana_sdk::instruction::Instruction,
    std::sync::Arc,
    tracing::instrument,
};

pub struct TradeP2p {
    program_id: Pubkey,
    fee_account: Pubkey,
    ledger: Arc<dyn LedgerQuerying>,
}

impl TradeP2p {
    pub fn new(program_id: Pubkey, fee_account: Pubkey, ledger: Arc<dyn LedgerQuerying>) -> Self {
        Self {
            program_id,
            fee_account,
            ledger,
        }
    }

    pub fn from_config(config: &Configuration) -> Self {
        Self::new(
            config.program_id,
            config.fee_account,
            Arc::new(config.rpc_client()),
        )
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn escrow_addresses(
        &self,
        creator: &Pubkey,
        order_id: OrderId,
    ) -> Result<EscrowAddresses, TradeError> {
        EscrowAddresses::derive(&self.program_id, creator, order_id)
    }

    /// Builds the instruction opening a new escrow order.
    #[instrument(skip_all, fields(creator = %request.creator, order_id = request.order_id))]
    pub async fn create_trade_instruction(
        &self,
        request: &TradeOrderRequest,
    ) -> Result<Instruction, TradeError> {
        self.try_create_trade_instruction(request)
            .await
            .inspect_err(|err| tracing::warn!(?err, "rejected trade order"))
    }

    async fn try_create_trade_instruction(
        &self,
        request: &TradeOrderRequest,
    ) -> Result<Instruction, TradeError> {
        // Checks that need no ledger state run first. The validated form
        // repeats them together with the role checks.
        let trade = Trade::from_mints(
            request.trade_type,
            request.trade_mint,
            request.receive_mint,
        )?;
        trade_validation::validate_amounts(request.trade_value, request.receive_value)?;
        let addresses = self.escrow_addresses(&request.creator, request.order_id)?;

        let (send, receive) = futures::try_join!(
            self.classify(
                request.creator_send_account,
                request.creator,
                trade.trade_mint()
            ),
            self.classify(
                request.creator_receive_account,
                request.creator,
                trade.receive_mint()
            ),
        )?;
        let order = ValidatedCreate::new(request, RoleFlags { send, receive })?;

        Ok(instruction::create_trade(
            self.program_id,
            self.fee_account,
            &order,
            &addresses,
        ))
    }

    /// Opens a new escrow order. The creator signs and pays.
    pub async fn create_trade(
        &self,
        request: &TradeOrderRequest,
    ) -> Result<FinalizedTransaction, TradeError> {
        let instruction = self.create_trade_instruction(request).await?;
        transaction::finalize(self.ledger.as_ref(), &[instruction]).await
    }

    /// Builds the instruction settling an existing order with `partner`.
    #[instrument(
        skip_all,
        fields(creator = %info.creator, order_id = info.order_id, partner = %partner.partner)
    )]
    pub async fn exchange_instruction(
        &self,
        info: &TradeInfo,
        partner: &PartnerInfo,
    ) -> Result<Instruction, TradeError> {
        self.try_exchange_instruction(info, partner)
            .await
            .inspect_err(|err| tracing::warn!(?err, "rejected exchange"))
    }

    async fn try_exchange_instruction(
        &self,
        info: &TradeInfo,
        partner: &PartnerInfo,
    ) -> Result<Instruction, TradeError> {
        trade_validation::validate_parties(info.creator, partner.partner, info.specified_partner)?;
        let trade = Trade::from_mints(info.trade_type, info.trade_mint, info.receive_mint)?;
        let addresses = self.escrow_addresses(&info.creator, info.order_id)?;

        let (send, receive) = futures::try_join!(
            self.classify(
                partner.partner_send_account,
                partner.partner,
                trade.receive_mint()
            ),
            self.classify(
                partner.partner_receive_account,
                partner.partner,
                trade.trade_mint()
            ),
        )?;
        let settlement = ValidatedExchange::new(info, partner, RoleFlags { send, receive })?;

        Ok(instruction::exchange(
            self.program_id,
            &settlement,
            &addresses,
        ))
    }

    /// Settles an existing order. The partner signs and pays.
    pub async fn exchange(
        &self,
        info: &TradeInfo,
        partner: &PartnerInfo,
    ) -> Result<FinalizedTransaction, TradeError> {
        let instruction = self.exchange_instruction(info, partner).await?;
        transaction::finalize(self.ledger.as_ref(), &[instruction]).await
    }

    /// Builds the instruction refunding an unsettled order to its creator.
    #[instrument(skip_all, fields(creator = %request.creator, order_id = request.order_id))]
    pub async fn cancel_instruction(
        &self,
        request: &CancelRequest,
    ) -> Result<Instruction, TradeError> {
        self.try_cancel_instruction(request)
            .await
            .inspect_err(|err| tracing::warn!(?err, "rejected cancellation"))
    }

    async fn try_cancel_instruction(
        &self,
        request: &CancelRequest,
    ) -> Result<Instruction, TradeError> {
        trade_validation::validate_cancel_mint(request.trade_type, request.trade_mint)?;
        let addresses = self.escrow_addresses(&request.creator, request.order_id)?;
        let send = self
            .classify(
                request.creator_send_account,
                request.creator,
                request.trade_mint,
            )
            .await?;
        let cancellation = ValidatedCancel::new(request, send)?;

        Ok(instruction::cancel(
            self.program_id,
            &cancellation,
            &addresses,
        ))
    }

    /// Cancels an unsettled order. The creator signs and pays.
    pub async fn cancel(
        &self,
        request: &CancelRequest,
    ) -> Result<FinalizedTransaction, TradeError> {
        let instruction = self.cancel_instruction(request).await?;
        transaction::finalize(self.ledger.as_ref(), &[instruction]).await
    }

    async fn classify(
        &self,
        account: Pubkey,
        owner: Pubkey,
        mint: Option<Pubkey>,
    ) -> Result<bool, TradeError> {
        is_holding_account(self.ledger.as_ref(), account, owner, mint).await
    }
}
