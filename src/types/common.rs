//! Common domain types for Kraken API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Market order - execute immediately at best available price
    Market,
    /// Limit order - execute at specified price or better
    Limit,
    /// Iceberg order - limit order showing only part of its volume
    Iceberg,
    /// Stop-loss order - trigger market order when price reaches stop price
    StopLoss,
    /// Take-profit order - trigger market order when price reaches profit target
    TakeProfit,
    /// Stop-loss limit - trigger limit order when price reaches stop price
    StopLossLimit,
    /// Take-profit limit - trigger limit order when price reaches profit target
    TakeProfitLimit,
    /// Trailing stop order
    TrailingStop,
    /// Trailing stop limit order
    TrailingStopLimit,
    /// Settle position order
    SettlePosition,
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled (default)
    #[default]
    GTC,
    /// Immediate or cancel - fill what's possible immediately, cancel rest
    IOC,
    /// Good till date - order expires at `expiretm`
    GTD,
}

/// Price signal that triggers conditional orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// Trigger on last trade price
    #[default]
    Last,
    /// Trigger on index price
    Index,
}

/// Self-trade prevention mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfTradePrevent {
    /// Cancel newest order
    CancelNewest,
    /// Cancel oldest order
    CancelOldest,
    /// Cancel both orders
    CancelBoth,
}

/// Asset class for assets and trading pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Currency/forex
    Currency,
}

/// Trading mode reported by the system status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    /// Kraken is operating normally.
    Online,
    /// The exchange is offline; no orders or cancellations are accepted.
    Maintenance,
    /// Resting orders may be cancelled but no new orders are accepted.
    CancelOnly,
    /// Only post-only limit orders are accepted.
    PostOnly,
}

/// OHLC interval in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum OhlcInterval {
    /// 1 minute
    Min1,
    /// 5 minutes
    Min5,
    /// 15 minutes
    Min15,
    /// 30 minutes
    Min30,
    /// 1 hour
    Hour1,
    /// 4 hours
    Hour4,
    /// 1 day
    Day1,
    /// 1 week
    Week1,
    /// 15 days
    Day15,
}

impl From<OhlcInterval> for u32 {
    fn from(interval: OhlcInterval) -> u32 {
        match interval {
            OhlcInterval::Min1 => 1,
            OhlcInterval::Min5 => 5,
            OhlcInterval::Min15 => 15,
            OhlcInterval::Min30 => 30,
            OhlcInterval::Hour1 => 60,
            OhlcInterval::Hour4 => 240,
            OhlcInterval::Day1 => 1440,
            OhlcInterval::Week1 => 10080,
            OhlcInterval::Day15 => 21600,
        }
    }
}

impl TryFrom<u32> for OhlcInterval {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OhlcInterval::Min1),
            5 => Ok(OhlcInterval::Min5),
            15 => Ok(OhlcInterval::Min15),
            30 => Ok(OhlcInterval::Min30),
            60 => Ok(OhlcInterval::Hour1),
            240 => Ok(OhlcInterval::Hour4),
            1440 => Ok(OhlcInterval::Day1),
            10080 => Ok(OhlcInterval::Week1),
            21600 => Ok(OhlcInterval::Day15),
            _ => Err(format!("Invalid OHLC interval: {}", value)),
        }
    }
}
