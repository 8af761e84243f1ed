//! Types for private REST API endpoints.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as, skip_serializing_none};

use crate::types::{BuySell, OrderType, SelfTradePrevent, TimeInForce, TriggerType};

// Account Endpoints

/// Extended balances keyed by asset.
pub type ExtendedBalances = HashMap<String, ExtendedBalance>;

/// Extended balance for a single asset.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedBalance {
    /// Total balance.
    pub balance: Decimal,
    /// Amount on hold for open orders.
    #[serde(default)]
    pub hold_trade: Option<Decimal>,
    /// Credit available.
    #[serde(default)]
    pub credit: Option<Decimal>,
    /// Credit in use.
    #[serde(default)]
    pub credit_used: Option<Decimal>,
}

impl ExtendedBalance {
    /// Balance not held by open orders.
    pub fn available(&self) -> Decimal {
        self.balance - self.hold_trade.unwrap_or_default()
    }
}

// Trading Endpoints

/// Request to add an order.
///
/// Close order fields are sent as `close[ordertype]`, `close[price]` and
/// `close[price2]`.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct AddOrderRequest {
    /// Asset pair. Required.
    pub pair: String,
    /// Order side (buy/sell).
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Order type.
    pub ordertype: OrderType,
    /// Order volume in base currency.
    pub volume: Decimal,
    /// Display volume for iceberg orders.
    pub displayvol: Option<Decimal>,
    /// Price (limit price for limit orders, trigger price for stop orders).
    pub price: Option<Decimal>,
    /// Secondary price (limit price for stop-limit orders).
    pub price2: Option<Decimal>,
    /// Price signal for triggered orders.
    pub trigger: Option<TriggerType>,
    /// Leverage.
    pub leverage: Option<String>,
    /// Reduce only flag.
    pub reduce_only: Option<bool>,
    /// Self trade prevention.
    pub stptype: Option<SelfTradePrevent>,
    /// Order flags (comma-separated).
    pub oflags: Option<String>,
    /// Time in force.
    pub timeinforce: Option<TimeInForce>,
    /// Scheduled start time.
    pub starttm: Option<String>,
    /// Expiration time.
    pub expiretm: Option<String>,
    /// RFC 3339 deadline after which the order is rejected.
    pub deadline: Option<String>,
    /// User reference ID.
    pub userref: Option<i64>,
    /// Validate only (don't submit).
    pub validate: Option<bool>,
    /// Close order type.
    #[serde(rename = "close[ordertype]")]
    pub close_ordertype: Option<OrderType>,
    /// Close order price.
    #[serde(rename = "close[price]")]
    pub close_price: Option<Decimal>,
    /// Close order secondary price.
    #[serde(rename = "close[price2]")]
    pub close_price2: Option<Decimal>,
}

impl AddOrderRequest {
    /// Create a new order request.
    pub fn new(
        pair: impl Into<String>,
        side: BuySell,
        ordertype: OrderType,
        volume: Decimal,
    ) -> Self {
        Self {
            pair: pair.into(),
            side,
            ordertype,
            volume,
            displayvol: None,
            price: None,
            price2: None,
            trigger: None,
            leverage: None,
            reduce_only: None,
            stptype: None,
            oflags: None,
            timeinforce: None,
            starttm: None,
            expiretm: None,
            deadline: None,
            userref: None,
            validate: None,
            close_ordertype: None,
            close_price: None,
            close_price2: None,
        }
    }

    /// Set the price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the secondary price.
    pub fn price2(mut self, price2: Decimal) -> Self {
        self.price2 = Some(price2);
        self
    }

    /// Set the trigger signal.
    pub fn trigger(mut self, trigger: TriggerType) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Set leverage.
    pub fn leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    /// Set as validate only.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Set user reference ID.
    pub fn userref(mut self, userref: i64) -> Self {
        self.userref = Some(userref);
        self
    }

    /// Set order flags.
    pub fn oflags(mut self, flags: impl Into<String>) -> Self {
        self.oflags = Some(flags.into());
        self
    }

    /// Set as post-only order.
    pub fn post_only(mut self) -> Self {
        self.oflags = Some("post".to_string());
        self
    }

    /// Set time in force.
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.timeinforce = Some(tif);
        self
    }

    /// Set self trade prevention.
    pub fn self_trade_prevent(mut self, stp: SelfTradePrevent) -> Self {
        self.stptype = Some(stp);
        self
    }

    /// Attach a conditional close order.
    pub fn close(mut self, ordertype: OrderType, price: Decimal, price2: Option<Decimal>) -> Self {
        self.close_ordertype = Some(ordertype);
        self.close_price = Some(price);
        self.close_price2 = price2;
        self
    }
}

/// Add order response.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderResponse {
    /// Order description.
    pub descr: AddOrderDescription,
    /// Transaction IDs (absent when only validating).
    #[serde(default)]
    pub txid: Option<Vec<String>>,
}

/// Add order description.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderDescription {
    /// Order description.
    pub order: String,
    /// Close order description.
    #[serde(default)]
    pub close: Option<String>,
}

/// Request to cancel an order.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Transaction ID, user reference ID or client order ID. Required.
    pub txid: String,
}

impl CancelOrderRequest {
    /// Create a new cancel order request.
    pub fn new(txid: impl Into<String>) -> Self {
        Self { txid: txid.into() }
    }
}

/// Cancel order response.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    /// Number of orders cancelled.
    pub count: u32,
    /// Orders that are pending cancellation.
    #[serde(default)]
    pub pending: Option<bool>,
}

/// Request to arm or reset the dead man's switch.
///
/// A zero timeout disables the timer.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct CancelAllOrdersAfterRequest {
    /// Countdown, sent in whole seconds.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl CancelAllOrdersAfterRequest {
    /// Create a request that cancels all orders after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Create a request that disables the timer.
    pub fn disable() -> Self {
        Self::new(Duration::ZERO)
    }
}

/// Dead man's switch state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAllOrdersAfter {
    /// Server time when the request was processed (RFC 3339).
    pub current_time: String,
    /// When open orders will be cancelled, or `"0"` if the timer is disabled.
    pub trigger_time: String,
}

impl CancelAllOrdersAfter {
    /// Whether a countdown is armed.
    pub fn is_armed(&self) -> bool {
        self.trigger_time != "0"
    }
}

// Subaccount Endpoints

/// Request to create a trading subaccount.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubaccountRequest {
    /// Username of the subaccount. Required.
    pub username: String,
    /// Email of the subaccount. Required.
    pub email: String,
}

impl CreateSubaccountRequest {
    /// Create a new subaccount request.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Request to move funds between a master account and its subaccounts.
#[derive(Debug, Clone, Serialize)]
pub struct AccountTransferRequest {
    /// Asset to transfer. Required.
    pub asset: String,
    /// Amount to transfer. Must be positive.
    pub amount: Decimal,
    /// IIBAN of the source account. Required.
    pub from: String,
    /// IIBAN of the destination account. Required.
    pub to: String,
}

impl AccountTransferRequest {
    /// Create a new transfer request.
    pub fn new(
        asset: impl Into<String>,
        amount: Decimal,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            amount,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Status of an account transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// The transfer is still being processed.
    Pending,
    /// The transfer has completed.
    Complete,
}

/// Account transfer response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountTransfer {
    /// Transfer ID.
    pub transfer_id: String,
    /// Transfer status.
    pub status: TransferStatus,
}

// WebSocket Endpoints

/// WebSocket token response.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketToken {
    /// The authentication token.
    pub token: String,
    /// Seconds until the token expires if no subscription is made.
    pub expires: u32,
}

// Earn Endpoints

/// Request to allocate funds to (or deallocate funds from) an earn strategy.
#[derive(Debug, Clone, Serialize)]
pub struct EarnAllocateRequest {
    /// Amount to allocate.
    pub amount: Decimal,
    /// Strategy ID. Required.
    pub strategy_id: String,
}

impl EarnAllocateRequest {
    /// Create a new earn allocation request.
    pub fn new(amount: Decimal, strategy_id: impl Into<String>) -> Self {
        Self {
            amount,
            strategy_id: strategy_id.into(),
        }
    }
}

/// Request for earn allocation or deallocation status.
#[derive(Debug, Clone, Serialize)]
pub struct EarnAllocationStatusRequest {
    /// Strategy ID. Required.
    pub strategy_id: String,
}

impl EarnAllocationStatusRequest {
    /// Create a new earn allocation status request.
    pub fn new(strategy_id: impl Into<String>) -> Self {
        Self {
            strategy_id: strategy_id.into(),
        }
    }
}

/// Request to list earn strategies.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct EarnStrategiesRequest {
    /// Sort ascending.
    pub ascending: Option<bool>,
    /// Filter by asset.
    pub asset: Option<String>,
    /// Pagination cursor.
    pub cursor: Option<String>,
    /// Result limit.
    pub limit: Option<u16>,
    /// Filter by lock type.
    pub lock_type: Option<Vec<LockType>>,
}

/// Request to list earn allocations.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct EarnAllocationsRequest {
    /// Sort ascending.
    pub ascending: Option<bool>,
    /// Convert amounts to this asset.
    pub converted_asset: Option<String>,
    /// Hide zero allocations.
    pub hide_zero_allocations: Option<bool>,
}

/// Allocation status response.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationStatus {
    /// Whether the operation is still pending.
    pub pending: bool,
}

/// Source of yield for a given earn strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldSourceType {
    /// Staking rewards.
    Staking,
    /// Off-chain rewards.
    OffChain,
    /// Opt-in rewards.
    OptInRewards,
}

/// Type of compounding for a given earn strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoCompoundType {
    /// Compounding enabled.
    Enabled,
    /// Compounding disabled.
    Disabled,
    /// Optional compounding.
    Optional,
}

/// Type of asset lock-up for a given earn strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockType {
    /// Flexible lock-up.
    Flex,
    /// Bonded lock-up.
    Bonded,
    /// Timed lock-up.
    Timed,
    /// Instant lock-up.
    Instant,
}

/// Origin of rewards from a strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct YieldSource {
    /// Yield source type.
    #[serde(rename = "type")]
    pub yield_type: YieldSourceType,
}

/// Compounding nature of a strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoCompound {
    /// Auto-compound type.
    #[serde(rename = "type")]
    pub auto_compound_type: AutoCompoundType,
    /// Whether this is the default option.
    #[serde(default)]
    pub default: Option<bool>,
}

/// Bracketed estimate for a strategy's APR.
#[derive(Debug, Clone, Deserialize)]
pub struct AprEstimate {
    /// Low APR estimate.
    pub low: Decimal,
    /// High APR estimate.
    pub high: Decimal,
}

/// How funds are locked by an earn strategy.
///
/// Bonding fields are only present for bonded strategies.
#[derive(Debug, Clone, Deserialize)]
pub struct LockTypeDetail {
    /// Lock type.
    #[serde(rename = "type")]
    pub lock_type: LockType,
    /// Payout frequency in seconds.
    #[serde(default)]
    pub payout_frequency: Option<i64>,
    /// Bonding period in seconds.
    #[serde(default)]
    pub bonding_period: Option<i64>,
    /// Whether the bonding period is variable.
    #[serde(default)]
    pub bonding_period_variable: Option<bool>,
    /// Whether rewards accrue while bonding.
    #[serde(default)]
    pub bonding_rewards: Option<bool>,
    /// Exit queue period in seconds.
    #[serde(default)]
    pub exit_queue_period: Option<i64>,
    /// Unbonding period in seconds.
    #[serde(default)]
    pub unbonding_period: Option<i64>,
    /// Whether the unbonding period is variable.
    #[serde(default)]
    pub unbonding_period_variable: Option<bool>,
    /// Whether rewards accrue while unbonding.
    #[serde(default)]
    pub unbonding_rewards: Option<bool>,
}

/// Paginated response for earn strategies.
#[derive(Debug, Clone, Deserialize)]
pub struct EarnStrategies {
    /// Strategy list.
    pub items: Vec<EarnStrategy>,
    /// Cursor for next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Earn strategy details.
#[derive(Debug, Clone, Deserialize)]
pub struct EarnStrategy {
    /// Strategy ID.
    pub id: String,
    /// Asset name.
    pub asset: String,
    /// Allocation fee.
    pub allocation_fee: Decimal,
    /// Deallocation fee.
    pub deallocation_fee: Decimal,
    /// Reasons allocation is currently restricted.
    #[serde(default)]
    pub allocation_restriction_info: Vec<String>,
    /// APR estimate.
    #[serde(default)]
    pub apr_estimate: Option<AprEstimate>,
    /// Auto-compound settings.
    pub auto_compound: AutoCompound,
    /// Whether allocation is allowed.
    pub can_allocate: bool,
    /// Whether deallocation is allowed.
    pub can_deallocate: bool,
    /// Lock type details.
    pub lock_type: LockTypeDetail,
    /// User cap.
    #[serde(default)]
    pub user_cap: Option<Decimal>,
    /// User minimum allocation.
    #[serde(default)]
    pub user_min_allocation: Option<Decimal>,
    /// Yield source.
    pub yield_source: YieldSource,
}

/// Response for earn allocations.
#[derive(Debug, Clone, Deserialize)]
pub struct EarnAllocations {
    /// Asset amounts are converted to.
    pub converted_asset: String,
    /// Allocation list.
    pub items: Vec<EarnAllocation>,
    /// Total allocated amount.
    pub total_allocated: Decimal,
    /// Total rewarded amount.
    pub total_rewarded: Decimal,
}

/// Earn allocation details.
#[derive(Debug, Clone, Deserialize)]
pub struct EarnAllocation {
    /// Strategy ID.
    pub strategy_id: String,
    /// Native asset.
    pub native_asset: String,
    /// Allocation amounts.
    pub amount_allocated: AmountAllocated,
    /// Total rewarded amount.
    pub total_rewarded: EarnAmount,
    /// Payout details.
    #[serde(default)]
    pub payout: Option<Payout>,
}

/// Amounts allocated to a strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct AmountAllocated {
    /// Total allocation.
    pub total: EarnAmount,
    /// Bonding allocations.
    #[serde(default)]
    pub bonding: Option<AllocationState>,
    /// Exit queue allocations.
    #[serde(default)]
    pub exit_queue: Option<AllocationState>,
    /// Pending allocations.
    #[serde(default)]
    pub pending: Option<EarnAmount>,
    /// Unbonding allocations.
    #[serde(default)]
    pub unbonding: Option<AllocationState>,
}

/// Allocations in a single state (bonding, unbonding, exit queue).
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationState {
    /// Allocation count.
    pub allocation_count: i64,
    /// Individual allocations.
    pub allocations: Vec<Allocation>,
    /// Converted amount.
    pub converted: Decimal,
    /// Native amount.
    pub native: Decimal,
}

/// Assets allocated to a strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct Allocation {
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires: String,
    /// Converted amount.
    pub converted: Decimal,
    /// Native amount.
    pub native: Decimal,
}

/// Payout information for an allocation.
#[derive(Debug, Clone, Deserialize)]
pub struct Payout {
    /// Period start.
    pub period_start: String,
    /// Period end.
    pub period_end: String,
    /// Accumulated reward.
    pub accumulated_reward: EarnAmount,
    /// Estimated reward.
    pub estimated_reward: EarnAmount,
}

/// Amount in converted and native assets.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EarnAmount {
    /// Converted amount.
    pub converted: Decimal,
    /// Native amount.
    pub native: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_add_order_form_encoding() {
        let request = AddOrderRequest::new("XBTUSD", BuySell::Buy, OrderType::Limit, dec("1.25"))
            .price(dec("37500"))
            .time_in_force(TimeInForce::IOC)
            .close(OrderType::StopLoss, dec("30000"), None);

        let encoded = serde_urlencoded::to_string(&request).unwrap();
        assert_eq!(
            encoded,
            "pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=37500&timeinforce=IOC\
             &close%5Bordertype%5D=stop-loss&close%5Bprice%5D=30000"
        );
    }

    #[test]
    fn test_cancel_all_orders_after_encodes_seconds() {
        let request = CancelAllOrdersAfterRequest::new(Duration::from_secs(60));
        assert_eq!(serde_urlencoded::to_string(&request).unwrap(), "timeout=60");
        assert_eq!(
            serde_urlencoded::to_string(CancelAllOrdersAfterRequest::disable()).unwrap(),
            "timeout=0"
        );
    }

    #[test]
    fn test_cancel_all_orders_after_response() {
        let json = r#"{"currentTime":"2023-03-24T17:41:56Z","triggerTime":"2023-03-24T17:42:56Z"}"#;
        let parsed: CancelAllOrdersAfter = serde_json::from_str(json).unwrap();
        assert!(parsed.is_armed());

        let json = r#"{"currentTime":"2023-03-24T17:41:56Z","triggerTime":"0"}"#;
        let parsed: CancelAllOrdersAfter = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_armed());
    }

    #[test]
    fn test_extended_balance_available() {
        let json = r#"{"ZUSD":{"balance":"25435.21","hold_trade":"8249.76"},"XXBT":{"balance":"1.2"}}"#;
        let parsed: ExtendedBalances = serde_json::from_str(json).unwrap();
        assert_eq!(parsed["ZUSD"].available(), dec("17185.45"));
        assert_eq!(parsed["XXBT"].available(), dec("1.2"));
    }

    #[test]
    fn test_account_transfer_response() {
        let json = r#"{"transfer_id":"TOH3AS2-LPCWR8-JDQGEU","status":"complete"}"#;
        let parsed: AccountTransfer = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.transfer_id, "TOH3AS2-LPCWR8-JDQGEU");
        assert_eq!(parsed.status, TransferStatus::Complete);
    }

    #[test]
    fn test_earn_strategies_request_skips_unset_fields() {
        let request = EarnStrategiesRequest {
            asset: Some("DOT".to_string()),
            lock_type: Some(vec![LockType::Bonded, LockType::Flex]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"asset":"DOT","lock_type":["bonded","flex"]}"#
        );
    }

    #[test]
    fn test_earn_strategy_deserialization() {
        let json = r#"{
            "items": [{
                "id": "ESRFUO3-Q62XD-WIOIL7",
                "asset": "DOT",
                "allocation_fee": "0",
                "deallocation_fee": "0",
                "allocation_restriction_info": [],
                "apr_estimate": {"low": "8.0000", "high": "12.0000"},
                "auto_compound": {"type": "enabled"},
                "can_allocate": true,
                "can_deallocate": true,
                "lock_type": {
                    "type": "bonded",
                    "bonding_period": 0,
                    "unbonding_period": 2419200,
                    "unbonding_rewards": false
                },
                "user_min_allocation": "0.01",
                "yield_source": {"type": "staking"}
            }],
            "next_cursor": "2"
        }"#;
        let parsed: EarnStrategies = serde_json::from_str(json).unwrap();
        let strategy = &parsed.items[0];
        assert_eq!(strategy.lock_type.lock_type, LockType::Bonded);
        assert_eq!(strategy.lock_type.unbonding_period, Some(2419200));
        assert_eq!(strategy.yield_source.yield_type, YieldSourceType::Staking);
        assert_eq!(parsed.next_cursor.as_deref(), Some("2"));
    }
}
