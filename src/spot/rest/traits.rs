//! Trait definition for the Kraken REST API client.
//!
//! This module provides the `KrakenClient` trait which abstracts all REST API operations.
//! This enables:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., audit logging wrapper)
//! - Alternative implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use kraken_rest_client::spot::rest::{KrakenClient, RequestContext};
//!
//! async fn show_balance<C: KrakenClient>(client: &C) -> Result<(), kraken_rest_client::KrakenError> {
//!     let ctx = RequestContext::new().with_otp("123456");
//!     for (asset, amount) in client.get_account_balance(&ctx).await? {
//!         println!("{asset}: {amount}");
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;

use rust_decimal::Decimal;

use crate::error::KrakenError;
use crate::spot::rest::context::RequestContext;
use crate::spot::rest::private::{
    AccountTransfer, AccountTransferRequest, AddOrderRequest, AddOrderResponse, AllocationStatus,
    CancelAllOrdersAfter, CancelAllOrdersAfterRequest, CancelOrderRequest, CancelOrderResponse,
    CreateSubaccountRequest, EarnAllocateRequest, EarnAllocationStatusRequest, EarnAllocations,
    EarnAllocationsRequest, EarnStrategies, EarnStrategiesRequest, ExtendedBalances,
    WebSocketToken,
};
use crate::spot::rest::public::{
    AssetInfo, AssetInfoRequest, AssetPair, AssetPairsRequest, OhlcRequest, OhlcResponse,
    OrderBook, OrderBookRequest, ServerTime, SystemStatus, TickerInfo,
};

/// Trait defining all Kraken REST API operations.
///
/// Private operations take a [`RequestContext`] first; it carries the
/// per-call OTP and timeout.
///
/// All methods are async and return `Result<T, KrakenError>`.
pub trait KrakenClient: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get the server time.
    fn get_server_time(&self) -> impl Future<Output = Result<ServerTime, KrakenError>> + Send;

    /// Get the system status.
    fn get_system_status(&self) -> impl Future<Output = Result<SystemStatus, KrakenError>> + Send;

    /// Get asset information.
    fn get_assets(
        &self,
        request: Option<&AssetInfoRequest>,
    ) -> impl Future<Output = Result<HashMap<String, AssetInfo>, KrakenError>> + Send;

    /// Get tradable asset pairs.
    fn get_asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> impl Future<Output = Result<HashMap<String, AssetPair>, KrakenError>> + Send;

    /// Get ticker information for one or more pairs.
    fn get_ticker(
        &self,
        pairs: &str,
    ) -> impl Future<Output = Result<HashMap<String, TickerInfo>, KrakenError>> + Send;

    /// Get OHLC (candlestick) data.
    fn get_ohlc(
        &self,
        request: &OhlcRequest,
    ) -> impl Future<Output = Result<OhlcResponse, KrakenError>> + Send;

    /// Get order book for a pair.
    fn get_order_book(
        &self,
        request: &OrderBookRequest,
    ) -> impl Future<Output = Result<HashMap<String, OrderBook>, KrakenError>> + Send;

    // ========== Private Endpoints - Account ==========

    /// Get account balance.
    fn get_account_balance(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<HashMap<String, Decimal>, KrakenError>> + Send;

    /// Get extended balance with hold amounts.
    fn get_extended_balance(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<ExtendedBalances, KrakenError>> + Send;

    // ========== Private Endpoints - Trading ==========

    /// Place a new order.
    fn add_order(
        &self,
        ctx: &RequestContext,
        request: &AddOrderRequest,
    ) -> impl Future<Output = Result<AddOrderResponse, KrakenError>> + Send;

    /// Cancel an open order.
    fn cancel_order(
        &self,
        ctx: &RequestContext,
        request: &CancelOrderRequest,
    ) -> impl Future<Output = Result<CancelOrderResponse, KrakenError>> + Send;

    /// Cancel all open orders.
    fn cancel_all_orders(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<CancelOrderResponse, KrakenError>> + Send;

    /// Arm, reset or disable the dead man's switch.
    fn cancel_all_orders_after(
        &self,
        ctx: &RequestContext,
        request: &CancelAllOrdersAfterRequest,
    ) -> impl Future<Output = Result<CancelAllOrdersAfter, KrakenError>> + Send;

    // ========== Private Endpoints - Subaccounts ==========

    /// Create a trading subaccount.
    fn create_subaccount(
        &self,
        ctx: &RequestContext,
        request: &CreateSubaccountRequest,
    ) -> impl Future<Output = Result<bool, KrakenError>> + Send;

    /// Transfer funds between the master account and a subaccount.
    fn account_transfer(
        &self,
        ctx: &RequestContext,
        request: &AccountTransferRequest,
    ) -> impl Future<Output = Result<AccountTransfer, KrakenError>> + Send;

    // ========== Private Endpoints - Earn ==========

    /// Allocate funds to an earn strategy.
    fn earn_allocate(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocateRequest,
    ) -> impl Future<Output = Result<bool, KrakenError>> + Send;

    /// Deallocate funds from an earn strategy.
    fn earn_deallocate(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocateRequest,
    ) -> impl Future<Output = Result<bool, KrakenError>> + Send;

    /// Get earn allocation status.
    fn get_earn_allocation_status(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocationStatusRequest,
    ) -> impl Future<Output = Result<AllocationStatus, KrakenError>> + Send;

    /// Get earn deallocation status.
    fn get_earn_deallocation_status(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocationStatusRequest,
    ) -> impl Future<Output = Result<AllocationStatus, KrakenError>> + Send;

    /// List earn strategies.
    fn list_earn_strategies(
        &self,
        ctx: &RequestContext,
        request: Option<&EarnStrategiesRequest>,
    ) -> impl Future<Output = Result<EarnStrategies, KrakenError>> + Send;

    /// List earn allocations.
    fn list_earn_allocations(
        &self,
        ctx: &RequestContext,
        request: Option<&EarnAllocationsRequest>,
    ) -> impl Future<Output = Result<EarnAllocations, KrakenError>> + Send;

    // ========== Private Endpoints - WebSocket ==========

    /// Get a WebSocket authentication token.
    fn get_websocket_token(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<WebSocketToken, KrakenError>> + Send;
}
