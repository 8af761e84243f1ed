//! Kraken REST API endpoint constants.
//!
//! Endpoint names are relative to the versioned base URL; public ones are
//! requested under `public/` and private ones under `private/`.

/// Base URL for the Kraken REST API, including the API version.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com/0/";

/// Public endpoints (no authentication required).
pub mod public {
    /// Get server time.
    pub const TIME: &str = "Time";
    /// Get system status.
    pub const SYSTEM_STATUS: &str = "SystemStatus";
    /// Get asset info.
    pub const ASSETS: &str = "Assets";
    /// Get tradable asset pairs.
    pub const ASSET_PAIRS: &str = "AssetPairs";
    /// Get ticker information.
    pub const TICKER: &str = "Ticker";
    /// Get OHLC data.
    pub const OHLC: &str = "OHLC";
    /// Get order book.
    pub const DEPTH: &str = "Depth";
}

/// Private endpoints (authentication required).
pub mod private {
    // Account endpoints
    /// Get account balance.
    pub const BALANCE: &str = "Balance";
    /// Get extended balance.
    pub const BALANCE_EX: &str = "BalanceEx";

    // Trading endpoints
    /// Add order.
    pub const ADD_ORDER: &str = "AddOrder";
    /// Cancel order.
    pub const CANCEL_ORDER: &str = "CancelOrder";
    /// Cancel all orders.
    pub const CANCEL_ALL: &str = "CancelAll";
    /// Cancel all orders after timeout.
    pub const CANCEL_ALL_ORDERS_AFTER: &str = "CancelAllOrdersAfter";

    // Sub-account endpoints
    /// Create sub-account.
    pub const CREATE_SUBACCOUNT: &str = "CreateSubaccount";
    /// Account transfer.
    pub const ACCOUNT_TRANSFER: &str = "AccountTransfer";

    // Earn endpoints
    /// Allocate earn funds.
    pub const EARN_ALLOCATE: &str = "Earn/Allocate";
    /// Deallocate earn funds.
    pub const EARN_DEALLOCATE: &str = "Earn/Deallocate";
    /// Get earn allocation status.
    pub const EARN_ALLOCATE_STATUS: &str = "Earn/AllocateStatus";
    /// Get earn deallocation status.
    pub const EARN_DEALLOCATE_STATUS: &str = "Earn/DeallocateStatus";
    /// List earn strategies.
    pub const EARN_STRATEGIES: &str = "Earn/Strategies";
    /// List earn allocations.
    pub const EARN_ALLOCATIONS: &str = "Earn/Allocations";

    // WebSocket token
    /// Get WebSocket authentication token.
    pub const GET_WEBSOCKETS_TOKEN: &str = "GetWebSocketsToken";
}
