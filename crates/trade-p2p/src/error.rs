use {
    model::{
        Pubkey,
        trade::{TradeType, UnknownTradeType},
    },
    strum::Display,
    thiserror::Error,
};

/// Which of the two optional mints of an order a violation refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum MintField {
    /// Mint of the token the creator offers.
    #[strum(serialize = "trade mint")]
    Trade,
    /// Mint of the token the creator requests.
    #[strum(serialize = "receive mint")]
    Receive,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MintViolation {
    Missing,
    Forbidden,
    /// Both sides of a token trade use the same mint.
    Duplicate,
}

/// The part an account plays in a trade.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum AccountRole {
    #[strum(serialize = "creator send")]
    CreatorSend,
    #[strum(serialize = "creator receive")]
    CreatorReceive,
    #[strum(serialize = "partner send")]
    PartnerSend,
    #[strum(serialize = "partner receive")]
    PartnerReceive,
}

/// What an account has to be for its role.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum HoldingKind {
    #[strum(serialize = "a token account of the expected mint and owner")]
    TokenAccount,
    #[strum(serialize = "the owner's native account")]
    NativeAccount,
}

impl HoldingKind {
    pub fn is_token_account(self) -> bool {
        matches!(self, Self::TokenAccount)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum AmountField {
    #[strum(serialize = "trade value")]
    TradeValue,
    #[strum(serialize = "receive value")]
    ReceiveValue,
}

#[derive(Debug, Error)]
pub enum TradeError {
    #[error(transparent)]
    InvalidTradeType(#[from] UnknownTradeType),
    #[error("{violation} {mint} for {trade_type} trade")]
    MintRequirementViolation {
        trade_type: TradeType,
        mint: MintField,
        violation: MintViolation,
    },
    #[error("{role} account must be {expected}")]
    RoleMismatch {
        role: AccountRole,
        expected: HoldingKind,
    },
    #[error("partner is the creator of the order")]
    DuplicatedParty,
    #[error("order is reserved for partner {expected}, got {supplied}")]
    PartnerMismatch { expected: Pubkey, supplied: Pubkey },
    #[error("{field} must be larger than zero")]
    ZeroAmount { field: AmountField },
    #[error("failed to look up account {account}")]
    AccountLookupFailed {
        account: Pubkey,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to fetch a recent blockhash")]
    FreshnessLookupFailed(#[source] anyhow::Error),
    #[error("no valid program address for the escrow seeds")]
    DerivationExhausted,
    #[error("instruction set has no signer to pay fees")]
    NoSignerFound,
    #[error("failed to serialize transaction")]
    Serialization(#[from] bincode::Error),
}

impl TradeError {
    /// Stable machine readable code for the error, suitable for API replies.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidTradeType(_) => "InvalidTradeType",
            Self::MintRequirementViolation { violation, .. } => match violation {
                MintViolation::Missing => "MissingMint",
                MintViolation::Forbidden => "ForbiddenMint",
                MintViolation::Duplicate => "DuplicateMint",
            },
            Self::RoleMismatch { .. } => "RoleMismatch",
            Self::DuplicatedParty => "DuplicatedParty",
            Self::PartnerMismatch { .. } => "PartnerMismatch",
            Self::ZeroAmount { .. } => "ZeroAmount",
            Self::AccountLookupFailed { .. } => "AccountLookupFailed",
            Self::FreshnessLookupFailed(_) => "FreshnessLookupFailed",
            Self::DerivationExhausted => "DerivationExhausted",
            Self::NoSignerFound => "NoSignerFound",
            Self::Serialization(_) => "Serialization",
        }
    }

    /// Whether the request itself is malformed, as opposed to the ledger or
    /// the local environment failing.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::AccountLookupFailed { .. }
                | Self::FreshnessLookupFailed(_)
                | Self::DerivationExhausted
                | Self::Serialization(_)
        )
    }
}
