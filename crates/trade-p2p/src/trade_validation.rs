//! Consistency rules between a trade type, the mints an order names and the
//! accounts the parties trade with.
//!
//! | trade type         | trade mint | receive mint | creator send | creator receive |
//! |--------------------|------------|--------------|--------------|-----------------|
//! | `AssetForAsset`    | required   | required     | token        | token           |
//! | `AssetForNative`   | required   | forbidden    | token        | native          |
//! | `NativeForAsset`   | forbidden  | required     | native       | token           |
//!
//! The counter-party mirrors the creator: they send what the creator receives
//! and receive what the creator sends.
//!
//! Everything in here is pure. Account classification happens before, with
//! the results handed in as [`RoleFlags`]. The `Validated*` types can only be
//! obtained by passing every check and are what the instruction builders take.

use {
    crate::error::{
        AccountRole,
        AmountField,
        HoldingKind,
        MintField,
        MintViolation,
        TradeError,
    },
    model::{
        Pubkey,
        order::{CancelRequest, PartnerInfo, TradeInfo, TradeOrderRequest},
        trade::TradeType,
    },
};

/// A trade whose mints are consistent with its type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trade {
    AssetForAsset { offered: Pubkey, requested: Pubkey },
    AssetForNative { offered: Pubkey },
    NativeForAsset { requested: Pubkey },
}

impl Trade {
    /// Checks the mints an order names against its trade type.
    pub fn from_mints(
        trade_type: TradeType,
        trade_mint: Option<Pubkey>,
        receive_mint: Option<Pubkey>,
    ) -> Result<Self, TradeError> {
        match trade_type {
            TradeType::AssetForAsset => asset_for_asset(trade_mint, receive_mint),
            TradeType::AssetForNative => asset_for_native(trade_mint, receive_mint),
            TradeType::NativeForAsset => native_for_asset(trade_mint, receive_mint),
        }
    }

    pub fn trade_type(&self) -> TradeType {
        match self {
            Self::AssetForAsset { .. } => TradeType::AssetForAsset,
            Self::AssetForNative { .. } => TradeType::AssetForNative,
            Self::NativeForAsset { .. } => TradeType::NativeForAsset,
        }
    }

    /// Mint of the token the creator offers, if the offered side is a token.
    pub fn trade_mint(&self) -> Option<Pubkey> {
        match self {
            Self::AssetForAsset { offered, .. } | Self::AssetForNative { offered } => {
                Some(*offered)
            }
            Self::NativeForAsset { .. } => None,
        }
    }

    /// Mint of the token the creator requests, if the requested side is a
    /// token.
    pub fn receive_mint(&self) -> Option<Pubkey> {
        match self {
            Self::AssetForAsset { requested, .. } | Self::NativeForAsset { requested } => {
                Some(*requested)
            }
            Self::AssetForNative { .. } => None,
        }
    }

    /// The mints in the order the escrow program expects them as trailing
    /// accounts: trade mint first, then receive mint.
    pub fn mints(&self) -> impl Iterator<Item = Pubkey> + use<> {
        self.trade_mint().into_iter().chain(self.receive_mint())
    }

    /// Kinds of the creator's (send, receive) accounts.
    pub fn creator_holdings(&self) -> (HoldingKind, HoldingKind) {
        match self {
            Self::AssetForAsset { .. } => (HoldingKind::TokenAccount, HoldingKind::TokenAccount),
            Self::AssetForNative { .. } => (HoldingKind::TokenAccount, HoldingKind::NativeAccount),
            Self::NativeForAsset { .. } => (HoldingKind::NativeAccount, HoldingKind::TokenAccount),
        }
    }

    /// Kinds of the counter-party's (send, receive) accounts.
    pub fn partner_holdings(&self) -> (HoldingKind, HoldingKind) {
        let (creator_send, creator_receive) = self.creator_holdings();
        (creator_receive, creator_send)
    }
}

fn asset_for_asset(
    trade_mint: Option<Pubkey>,
    receive_mint: Option<Pubkey>,
) -> Result<Trade, TradeError> {
    let trade_type = TradeType::AssetForAsset;
    let offered = trade_mint
        .ok_or_else(|| mint_error(trade_type, MintField::Trade, MintViolation::Missing))?;
    let requested = receive_mint
        .ok_or_else(|| mint_error(trade_type, MintField::Receive, MintViolation::Missing))?;
    if offered == requested {
        return Err(mint_error(trade_type, MintField::Receive, MintViolation::Duplicate));
    }
    Ok(Trade::AssetForAsset { offered, requested })
}

fn asset_for_native(
    trade_mint: Option<Pubkey>,
    receive_mint: Option<Pubkey>,
) -> Result<Trade, TradeError> {
    let trade_type = TradeType::AssetForNative;
    let offered = trade_mint
        .ok_or_else(|| mint_error(trade_type, MintField::Trade, MintViolation::Missing))?;
    if receive_mint.is_some() {
        return Err(mint_error(trade_type, MintField::Receive, MintViolation::Forbidden));
    }
    Ok(Trade::AssetForNative { offered })
}

fn native_for_asset(
    trade_mint: Option<Pubkey>,
    receive_mint: Option<Pubkey>,
) -> Result<Trade, TradeError> {
    let trade_type = TradeType::NativeForAsset;
    let requested = receive_mint
        .ok_or_else(|| mint_error(trade_type, MintField::Receive, MintViolation::Missing))?;
    if trade_mint.is_some() {
        return Err(mint_error(trade_type, MintField::Trade, MintViolation::Forbidden));
    }
    Ok(Trade::NativeForAsset { requested })
}

fn mint_error(trade_type: TradeType, mint: MintField, violation: MintViolation) -> TradeError {
    TradeError::MintRequirementViolation {
        trade_type,
        mint,
        violation,
    }
}

/// Classification results of a party's two accounts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RoleFlags {
    /// Whether the send account is a genuine token account.
    pub send: bool,
    /// Whether the receive account is a genuine token account.
    pub receive: bool,
}

pub fn validate_creator_roles(trade: &Trade, roles: RoleFlags) -> Result<(), TradeError> {
    let (send, receive) = trade.creator_holdings();
    check_role(AccountRole::CreatorSend, send, roles.send)?;
    check_role(AccountRole::CreatorReceive, receive, roles.receive)
}

pub fn validate_partner_roles(trade: &Trade, roles: RoleFlags) -> Result<(), TradeError> {
    let (send, receive) = trade.partner_holdings();
    check_role(AccountRole::PartnerSend, send, roles.send)?;
    check_role(AccountRole::PartnerReceive, receive, roles.receive)
}

/// Cancelling an order that locked a token needs the token's mint to find the
/// refund account.
pub fn validate_cancel_mint(
    trade_type: TradeType,
    trade_mint: Option<Pubkey>,
) -> Result<(), TradeError> {
    if trade_type.offers_asset() && trade_mint.is_none() {
        return Err(mint_error(trade_type, MintField::Trade, MintViolation::Missing));
    }
    Ok(())
}

/// A cancellation refunds the vault into the creator's send account, which
/// therefore has to match the offered side of the trade.
pub fn validate_cancel_role(
    trade_type: TradeType,
    send_is_token_account: bool,
) -> Result<(), TradeError> {
    let expected = match trade_type {
        TradeType::AssetForAsset | TradeType::AssetForNative => HoldingKind::TokenAccount,
        TradeType::NativeForAsset => HoldingKind::NativeAccount,
    };
    check_role(AccountRole::CreatorSend, expected, send_is_token_account)
}

fn check_role(
    role: AccountRole,
    expected: HoldingKind,
    is_token_account: bool,
) -> Result<(), TradeError> {
    if expected.is_token_account() != is_token_account {
        return Err(TradeError::RoleMismatch { role, expected });
    }
    Ok(())
}

/// Checks who may settle an order. Settling your own order is rejected even
/// when the order is reserved for the creator.
pub fn validate_parties(
    creator: Pubkey,
    partner: Pubkey,
    specified_partner: Option<Pubkey>,
) -> Result<(), TradeError> {
    if creator == partner {
        return Err(TradeError::DuplicatedParty);
    }
    match specified_partner {
        Some(expected) if expected != partner => Err(TradeError::PartnerMismatch {
            expected,
            supplied: partner,
        }),
        _ => Ok(()),
    }
}

/// The escrow program rejects orders that trade nothing for something.
pub fn validate_amounts(trade_value: u64, receive_value: u64) -> Result<(), TradeError> {
    if trade_value == 0 {
        return Err(TradeError::ZeroAmount {
            field: AmountField::TradeValue,
        });
    }
    if receive_value == 0 {
        return Err(TradeError::ZeroAmount {
            field: AmountField::ReceiveValue,
        });
    }
    Ok(())
}

/// A create request that passed every check.
#[derive(Clone, Copy, Debug)]
pub struct ValidatedCreate<'a> {
    request: &'a TradeOrderRequest,
    trade: Trade,
}

impl<'a> ValidatedCreate<'a> {
    /// `roles` classify the creator's send and receive accounts against the
    /// request's trade and receive mints.
    pub fn new(request: &'a TradeOrderRequest, roles: RoleFlags) -> Result<Self, TradeError> {
        let trade = Trade::from_mints(
            request.trade_type,
            request.trade_mint,
            request.receive_mint,
        )?;
        validate_amounts(request.trade_value, request.receive_value)?;
        validate_creator_roles(&trade, roles)?;
        Ok(Self { request, trade })
    }

    pub fn request(&self) -> &'a TradeOrderRequest {
        self.request
    }

    pub fn trade(&self) -> &Trade {
        &self.trade
    }
}

/// A settlement of an existing order that passed every check.
#[derive(Clone, Copy, Debug)]
pub struct ValidatedExchange<'a> {
    info: &'a TradeInfo,
    partner: &'a PartnerInfo,
    trade: Trade,
}

impl<'a> ValidatedExchange<'a> {
    /// `roles` classify the partner's send account against the receive mint
    /// and their receive account against the trade mint.
    pub fn new(
        info: &'a TradeInfo,
        partner: &'a PartnerInfo,
        roles: RoleFlags,
    ) -> Result<Self, TradeError> {
        validate_parties(info.creator, partner.partner, info.specified_partner)?;
        let trade = Trade::from_mints(info.trade_type, info.trade_mint, info.receive_mint)?;
        validate_partner_roles(&trade, roles)?;
        Ok(Self {
            info,
            partner,
            trade,
        })
    }

    pub fn info(&self) -> &'a TradeInfo {
        self.info
    }

    pub fn partner(&self) -> &'a PartnerInfo {
        self.partner
    }

    pub fn trade(&self) -> &Trade {
        &self.trade
    }
}

/// A cancellation that passed every check.
#[derive(Clone, Copy, Debug)]
pub struct ValidatedCancel<'a> {
    request: &'a CancelRequest,
}

impl<'a> ValidatedCancel<'a> {
    /// `send_is_token_account` classifies the creator's send account against
    /// the request's trade mint.
    pub fn new(
        request: &'a CancelRequest,
        send_is_token_account: bool,
    ) -> Result<Self, TradeError> {
        validate_cancel_mint(request.trade_type, request.trade_mint)?;
        validate_cancel_role(request.trade_type, send_is_token_account)?;
        Ok(Self { request })
    }

    pub fn request(&self) -> &'a CancelRequest {
        self.request
    }
}
