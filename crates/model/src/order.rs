//! Requests accepted by the escrow client, with serialization suitable for
//! JSON APIs (pubkeys as base58 strings, camelCase field names).

use {
    crate::{OrderId, trade::TradeType},
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, serde_as},
    solana_sdk::pubkey::Pubkey,
};

/// Everything the creator supplies to open a new escrow.
#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOrderRequest {
    #[serde_as(as = "DisplayFromStr")]
    pub creator: Pubkey,
    pub order_id: OrderId,
    /// When set, only this identity may settle the order.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub specified_partner: Option<Pubkey>,
    /// Amount the creator locks into the vault.
    pub trade_value: u64,
    /// Amount the creator expects in return.
    pub receive_value: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub creator_send_account: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub creator_receive_account: Pubkey,
    /// Mint of the offered token.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub trade_mint: Option<Pubkey>,
    /// Mint of the requested token.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub receive_mint: Option<Pubkey>,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    pub trade_type: TradeType,
}

/// An existing order as seen by a counter-party who wants to settle it.
///
/// Amounts are not part of it: the escrow state holds them and the program
/// settles exactly what was locked. Listings that still carry `tradeValue` or
/// `receiveValue` deserialize, the fields are ignored.
#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInfo {
    #[serde_as(as = "DisplayFromStr")]
    pub creator: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub creator_send_account: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub creator_receive_account: Pubkey,
    pub order_id: OrderId,
    pub trade_type: TradeType,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub specified_partner: Option<Pubkey>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub trade_mint: Option<Pubkey>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub receive_mint: Option<Pubkey>,
}

impl From<&TradeOrderRequest> for TradeInfo {
    fn from(request: &TradeOrderRequest) -> Self {
        Self {
            creator: request.creator,
            creator_send_account: request.creator_send_account,
            creator_receive_account: request.creator_receive_account,
            order_id: request.order_id,
            trade_type: request.trade_type,
            specified_partner: request.specified_partner,
            trade_mint: request.trade_mint,
            receive_mint: request.receive_mint,
        }
    }
}

/// The counter-party settling an order and the accounts they settle with.
#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInfo {
    #[serde_as(as = "DisplayFromStr")]
    pub partner: Pubkey,
    /// Pays the requested side of the trade.
    #[serde_as(as = "DisplayFromStr")]
    pub partner_send_account: Pubkey,
    /// Receives the offered side from the vault.
    #[serde_as(as = "DisplayFromStr")]
    pub partner_receive_account: Pubkey,
}

/// The creator withdrawing an order that was not settled.
#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[serde_as(as = "DisplayFromStr")]
    pub creator: Pubkey,
    pub order_id: OrderId,
    /// The account the vault refunds into.
    #[serde_as(as = "DisplayFromStr")]
    pub creator_send_account: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub trade_mint: Option<Pubkey>,
    pub trade_type: TradeType,
}

impl From<&TradeInfo> for CancelRequest {
    fn from(info: &TradeInfo) -> Self {
        Self {
            creator: info.creator,
            order_id: info.order_id,
            creator_send_account: info.creator_send_account,
            trade_mint: info.trade_mint,
            trade_type: info.trade_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json, std::str::FromStr};

    fn key(s: &str) -> Pubkey {
        Pubkey::from_str(s).unwrap()
    }

    #[test]
    fn deserialize_order_request() {
        let value = json!({
            "creator": "DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9",
            "orderId": 42,
            "tradeValue": 1000,
            "receiveValue": 5,
            "creatorSendAccount": "EJV62xsWEZ5Kbzy7QNR8ogvDDQYqMkdN31UyCqkeaHDe",
            "creatorReceiveAccount": "DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9",
            "tradeMint": "So11111111111111111111111111111111111111112",
            "timestamp": 1700000000,
            "tradeType": "asset-for-native",
        });
        let request: TradeOrderRequest = serde_json::from_value(value).unwrap();
        assert_eq!(
            request,
            TradeOrderRequest {
                creator: key("DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9"),
                order_id: 42,
                specified_partner: None,
                trade_value: 1000,
                receive_value: 5,
                creator_send_account: key("EJV62xsWEZ5Kbzy7QNR8ogvDDQYqMkdN31UyCqkeaHDe"),
                creator_receive_account: key("DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9"),
                trade_mint: Some(key("So11111111111111111111111111111111111111112")),
                receive_mint: None,
                timestamp: 1_700_000_000,
                trade_type: TradeType::AssetForNative,
            }
        );
    }

    #[test]
    fn absent_optionals_serialize_as_null() {
        let partner = PartnerInfo {
            partner: Pubkey::new_from_array([1; 32]),
            partner_send_account: Pubkey::new_from_array([2; 32]),
            partner_receive_account: Pubkey::new_from_array([3; 32]),
        };
        let value = serde_json::to_value(&partner).unwrap();
        assert_eq!(
            value["partner"],
            json!(Pubkey::new_from_array([1; 32]).to_string())
        );

        let cancel = CancelRequest {
            creator: Pubkey::new_from_array([1; 32]),
            order_id: 7,
            creator_send_account: Pubkey::new_from_array([1; 32]),
            trade_mint: None,
            trade_type: TradeType::NativeForAsset,
        };
        let value = serde_json::to_value(&cancel).unwrap();
        assert_eq!(value["tradeMint"], json!(null));
        assert_eq!(value["tradeType"], json!("native-for-asset"));
    }

    #[test]
    fn trade_info_from_request() {
        let request = TradeOrderRequest {
            creator: Pubkey::new_from_array([1; 32]),
            order_id: 9,
            specified_partner: Some(Pubkey::new_from_array([9; 32])),
            trade_value: 10,
            receive_value: 20,
            creator_send_account: Pubkey::new_from_array([2; 32]),
            creator_receive_account: Pubkey::new_from_array([3; 32]),
            trade_mint: Some(Pubkey::new_from_array([4; 32])),
            receive_mint: Some(Pubkey::new_from_array([5; 32])),
            timestamp: 0,
            trade_type: TradeType::AssetForAsset,
        };
        let info = TradeInfo::from(&request);
        assert_eq!(info.order_id, 9);
        assert_eq!(info.specified_partner, request.specified_partner);

        let cancel = CancelRequest::from(&info);
        assert_eq!(cancel.creator_send_account, request.creator_send_account);
        assert_eq!(cancel.trade_mint, request.trade_mint);
    }

    #[test]
    fn trade_info_ignores_listed_amounts() {
        let value = json!({
            "creator": "DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9",
            "creatorSendAccount": "EJV62xsWEZ5Kbzy7QNR8ogvDDQYqMkdN31UyCqkeaHDe",
            "creatorReceiveAccount": "DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9",
            "orderId": 3,
            "tradeType": "native-for-asset",
            "tradeValue": 100,
            "receiveValue": 200,
            "receiveMint": "So11111111111111111111111111111111111111112",
        });
        let info: TradeInfo = serde_json::from_value(value).unwrap();
        assert_eq!(info.order_id, 3);
        assert_eq!(info.trade_mint, None);
        assert_eq!(
            info.receive_mint,
            Some(key("So11111111111111111111111111111111111111112"))
        );

        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("tradeValue").is_none());
    }
}
