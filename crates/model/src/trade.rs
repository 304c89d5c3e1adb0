//! The kinds of value exchange an escrow order can describe.

use {
    serde::{Deserialize, Serialize},
    strum::{Display, EnumString, VariantArray},
    thiserror::Error,
};

/// Which side of an order moves an SPL token and which moves native SOL.
///
/// The "offered" side is what the creator locks into the vault, the
/// "requested" side is what the counter-party pays to settle.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    VariantArray,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TradeType {
    /// SPL token for SPL token.
    AssetForAsset,
    /// SPL token for native SOL.
    AssetForNative,
    /// Native SOL for SPL token.
    NativeForAsset,
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("unknown trade type code {0}")]
pub struct UnknownTradeType(pub u8);

impl TradeType {
    /// The code the escrow program stores for this trade type.
    pub fn code(self) -> u8 {
        match self {
            Self::AssetForAsset => 1,
            Self::AssetForNative => 2,
            Self::NativeForAsset => 3,
        }
    }

    /// Whether the creator offers an SPL token, i.e. whether a trade mint is
    /// required.
    pub fn offers_asset(self) -> bool {
        match self {
            Self::AssetForAsset | Self::AssetForNative => true,
            Self::NativeForAsset => false,
        }
    }

    /// Whether the creator requests an SPL token, i.e. whether a receive mint
    /// is required.
    pub fn requests_asset(self) -> bool {
        match self {
            Self::AssetForAsset | Self::NativeForAsset => true,
            Self::AssetForNative => false,
        }
    }
}

impl TryFrom<u8> for TradeType {
    type Error = UnknownTradeType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::AssetForAsset),
            2 => Ok(Self::AssetForNative),
            3 => Ok(Self::NativeForAsset),
            unknown => Err(UnknownTradeType(unknown)),
        }
    }
}
