//! Open position wire model.

use serde::Deserialize;

/// One open position as returned by the equity portfolio endpoint.
///
/// Decoded fresh on every poll and discarded after publishing; the ticker is
/// the only identity a position has within a cycle. The API returns more
/// fields than listed here (`frontend`, `initialFillDate`, `maxBuy`,
/// `maxSell`, `pieQuantity`); they are ignored during decoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Instrument ticker (e.g., "AAPL_US_EQ").
    pub ticker: String,
    /// Number of shares held.
    pub quantity: f64,
    /// Average fill price.
    pub average_price: f64,
    /// Current market price.
    pub current_price: f64,
    /// Profit/loss in account currency.
    pub ppl: f64,
    /// FX component of profit/loss.
    pub fx_ppl: f64,
}

impl Position {
    /// Market value of the position (quantity x current price).
    pub fn value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Acquisition cost of the position (quantity x average price).
    pub fn cost(&self) -> f64 {
        self.quantity * self.average_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_position_ignores_extra_fields() {
        let raw = r#"{
            "ticker": "AAPL_US_EQ",
            "quantity": 2.5,
            "averagePrice": 180.2,
            "currentPrice": 195.4,
            "ppl": 38.0,
            "fxPpl": -1.25,
            "frontend": "API",
            "initialFillDate": "2024-01-02T10:00:00.000+02:00",
            "maxBuy": 100.0,
            "maxSell": 2.5,
            "pieQuantity": 0.0
        }"#;

        let pos: Position = serde_json::from_str(raw).expect("decode position");
        assert_eq!(pos.ticker, "AAPL_US_EQ");
        assert_eq!(pos.quantity, 2.5);
        assert_eq!(pos.average_price, 180.2);
        assert_eq!(pos.current_price, 195.4);
        assert_eq!(pos.ppl, 38.0);
        assert_eq!(pos.fx_ppl, -1.25);
    }

    #[test]
    fn test_value_and_cost_are_exact_products() {
        let pos = Position {
            ticker: "MSFT_US_EQ".to_string(),
            quantity: 3.0,
            average_price: 310.1,
            current_price: 402.7,
            ppl: 277.8,
            fx_ppl: 0.0,
        };

        assert_eq!(pos.value(), 3.0 * 402.7);
        assert_eq!(pos.cost(), 3.0 * 310.1);
    }

    #[test]
    fn test_decode_empty_array() {
        let positions: Vec<Position> = serde_json::from_str("[]").expect("decode empty array");
        assert!(positions.is_empty());
    }
}
