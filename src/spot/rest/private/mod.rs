//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Every call takes a [`RequestContext`] carrying the optional OTP and
//! timeout. Required fields are checked before anything is signed or sent.

mod types;

pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::KrakenError;
use crate::spot::rest::context::RequestContext;
use crate::spot::rest::endpoints::private;
use crate::spot::rest::{SpotRestClient, require};

impl SpotRestClient {
    // ========== Account ==========

    /// Get account balance.
    ///
    /// Returns the balances of all assets in the account.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::auth::StaticCredentials;
    /// use kraken_rest_client::spot::rest::{RequestContext, SpotRestClient};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "c2VjcmV0"));
    ///     let client = SpotRestClient::builder().credentials(credentials).build();
    ///
    ///     let balances = client.get_account_balance(&RequestContext::default()).await?;
    ///     for (asset, balance) in balances {
    ///         println!("{}: {}", asset, balance);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_account_balance(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, Decimal>, KrakenError> {
        self.private_form(ctx, private::BALANCE, &()).await
    }

    /// Get extended balance with hold amounts.
    pub async fn get_extended_balance(
        &self,
        ctx: &RequestContext,
    ) -> Result<ExtendedBalances, KrakenError> {
        self.private_form(ctx, private::BALANCE_EX, &()).await
    }

    // ========== Trading ==========

    /// Place a new order.
    ///
    /// Set [`AddOrderRequest::validate`] to check the order without submitting it.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `pair` is empty.
    pub async fn add_order(
        &self,
        ctx: &RequestContext,
        request: &AddOrderRequest,
    ) -> Result<AddOrderResponse, KrakenError> {
        require(&request.pair, "pair")?;
        self.private_form(ctx, private::ADD_ORDER, request).await
    }

    /// Cancel an open order.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `txid` is empty.
    pub async fn cancel_order(
        &self,
        ctx: &RequestContext,
        request: &CancelOrderRequest,
    ) -> Result<CancelOrderResponse, KrakenError> {
        require(&request.txid, "txid")?;
        self.private_form(ctx, private::CANCEL_ORDER, request).await
    }

    /// Cancel all open orders.
    pub async fn cancel_all_orders(
        &self,
        ctx: &RequestContext,
    ) -> Result<CancelOrderResponse, KrakenError> {
        self.private_form(ctx, private::CANCEL_ALL, &()).await
    }

    /// Arm, reset or disable the dead man's switch.
    ///
    /// Once armed, all open orders are cancelled unless the call is repeated
    /// before the timeout runs out.
    pub async fn cancel_all_orders_after(
        &self,
        ctx: &RequestContext,
        request: &CancelAllOrdersAfterRequest,
    ) -> Result<CancelAllOrdersAfter, KrakenError> {
        self.private_form(ctx, private::CANCEL_ALL_ORDERS_AFTER, request)
            .await
    }

    // ========== Subaccounts ==========

    /// Create a trading subaccount.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `username` or `email` is empty.
    pub async fn create_subaccount(
        &self,
        ctx: &RequestContext,
        request: &CreateSubaccountRequest,
    ) -> Result<bool, KrakenError> {
        require(&request.username, "username")?;
        require(&request.email, "email")?;
        self.private_form(ctx, private::CREATE_SUBACCOUNT, request)
            .await
    }

    /// Transfer funds between the master account and a subaccount.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `asset`, `from` or `to` is
    /// empty, or `amount` is not positive.
    pub async fn account_transfer(
        &self,
        ctx: &RequestContext,
        request: &AccountTransferRequest,
    ) -> Result<AccountTransfer, KrakenError> {
        require(&request.asset, "asset")?;
        require(&request.from, "from")?;
        require(&request.to, "to")?;
        if request.amount <= Decimal::ZERO {
            return Err(KrakenError::InvalidRequest(
                "amount must be positive".to_string(),
            ));
        }
        self.private_form(ctx, private::ACCOUNT_TRANSFER, request)
            .await
    }

    // ========== Earn ==========

    /// Allocate funds to an earn strategy.
    ///
    /// The allocation is asynchronous; poll
    /// [`get_earn_allocation_status`](Self::get_earn_allocation_status).
    pub async fn earn_allocate(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocateRequest,
    ) -> Result<bool, KrakenError> {
        require(&request.strategy_id, "strategy_id")?;
        self.private_json(ctx, private::EARN_ALLOCATE, request).await
    }

    /// Deallocate funds from an earn strategy.
    pub async fn earn_deallocate(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocateRequest,
    ) -> Result<bool, KrakenError> {
        require(&request.strategy_id, "strategy_id")?;
        self.private_json(ctx, private::EARN_DEALLOCATE, request).await
    }

    /// Get the status of the last allocation request for a strategy.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `strategy_id` is empty.
    pub async fn get_earn_allocation_status(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocationStatusRequest,
    ) -> Result<AllocationStatus, KrakenError> {
        require(&request.strategy_id, "strategy_id")?;
        self.private_json(ctx, private::EARN_ALLOCATE_STATUS, request)
            .await
    }

    /// Get the status of the last deallocation request for a strategy.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `strategy_id` is empty.
    pub async fn get_earn_deallocation_status(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocationStatusRequest,
    ) -> Result<AllocationStatus, KrakenError> {
        require(&request.strategy_id, "strategy_id")?;
        self.private_json(ctx, private::EARN_DEALLOCATE_STATUS, request)
            .await
    }

    /// List earn strategies available to the account.
    pub async fn list_earn_strategies(
        &self,
        ctx: &RequestContext,
        request: Option<&EarnStrategiesRequest>,
    ) -> Result<EarnStrategies, KrakenError> {
        match request {
            Some(req) => self.private_json(ctx, private::EARN_STRATEGIES, req).await,
            None => self.private_json(ctx, private::EARN_STRATEGIES, &()).await,
        }
    }

    /// List the account's earn allocations.
    pub async fn list_earn_allocations(
        &self,
        ctx: &RequestContext,
        request: Option<&EarnAllocationsRequest>,
    ) -> Result<EarnAllocations, KrakenError> {
        match request {
            Some(req) => self.private_json(ctx, private::EARN_ALLOCATIONS, req).await,
            None => self.private_json(ctx, private::EARN_ALLOCATIONS, &()).await,
        }
    }

    // ========== WebSocket ==========

    /// Get a token for authenticating private WebSocket subscriptions.
    ///
    /// The token must be used within 15 minutes of creation.
    pub async fn get_websocket_token(
        &self,
        ctx: &RequestContext,
    ) -> Result<WebSocketToken, KrakenError> {
        self.private_form(ctx, private::GET_WEBSOCKETS_TOKEN, &())
            .await
    }
}
