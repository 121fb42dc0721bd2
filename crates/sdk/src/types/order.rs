use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Side of the order.
///
/// Present in the submitted order for validation but not part of the encoded
/// signature payload; the venue schema carries no side field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Kind of the order.
///
/// The signature schema supports a single kind and bakes its numeric code
/// into the first payload field rather than encoding this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
}

impl OrderType {
    /// Venue wire code of the order kind.
    pub fn code(&self) -> u8 {
        match self {
            OrderType::Market => 4,
        }
    }
}

/// Trade intent to be signed.
///
/// `nonce` is a hyphenated UUID (32 hex digits once hyphens are stripped).
/// `quantity` stays as decimal text end to end: the venue signs the literal
/// string the user submitted, so reformatting through a numeric type would
/// change the signed bytes. `wallet` is a 20-byte address in hex text form,
/// passed through verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub market: String,
    pub nonce: String,
    pub quantity: String,
    pub side: OrderSide,
    pub r#type: OrderType,
    pub wallet: String,
}

impl Order {
    /// Parses an order from its JSON text form.
    pub fn from_json(text: &str) -> Result<Self, EncodeError> {
        serde_json::from_str(text).map_err(|err| EncodeError::InvalidOrder(err.to_string()))
    }
}

impl Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "market": "USDT-USDC",
        "nonce": "3ebb6ba0-0712-11ee-a183-032e8f54ac8a",
        "quantity": "33.06375000",
        "side": "buy",
        "type": "market",
        "wallet": "0xef4d9010289f51be2b49864b5db8a01705e6348b"
    }"#;

    #[test]
    fn parses_order_json() {
        let order = Order::from_json(SAMPLE).unwrap();
        assert_eq!(order.market, "USDT-USDC");
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.r#type, OrderType::Market);
        assert_eq!(order.quantity, "33.06375000");
    }

    #[test]
    fn key_order_in_source_json_is_irrelevant() {
        let shuffled = r#"{
            "wallet": "0xef4d9010289f51be2b49864b5db8a01705e6348b",
            "type": "market",
            "side": "buy",
            "quantity": "33.06375000",
            "nonce": "3ebb6ba0-0712-11ee-a183-032e8f54ac8a",
            "market": "USDT-USDC"
        }"#;
        assert_eq!(Order::from_json(shuffled).unwrap(), Order::from_json(SAMPLE).unwrap());
    }

    #[test]
    fn rejects_malformed_order() {
        assert!(matches!(Order::from_json("not json"), Err(EncodeError::InvalidOrder(_))));
        assert!(matches!(
            Order::from_json(r#"{"market": "USDT-USDC"}"#),
            Err(EncodeError::InvalidOrder(_))
        ));
        assert!(matches!(
            Order::from_json(&SAMPLE.replace("\"buy\"", "\"hold\"")),
            Err(EncodeError::InvalidOrder(_))
        ));
    }
}
