//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::KrakenError;
use crate::spot::rest::endpoints::public;
use crate::spot::rest::{SpotRestClient, require};

/// Largest depth the order book endpoint accepts.
pub const MAX_ORDER_BOOK_COUNT: u16 = 500;

impl SpotRestClient {
    /// Get the server time.
    ///
    /// This is useful for synchronizing local time and checking API availability.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::spot::rest::SpotRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SpotRestClient::new();
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {} ({})", time.unixtime, time.rfc1123);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ServerTime, KrakenError> {
        self.public_get(public::TIME, &()).await
    }

    /// Get the system status.
    ///
    /// Returns the current trading mode and timestamp.
    pub async fn get_system_status(&self) -> Result<SystemStatus, KrakenError> {
        self.public_get(public::SYSTEM_STATUS, &()).await
    }

    /// Get asset information.
    ///
    /// # Arguments
    ///
    /// * `request` - Optional request parameters to filter assets.
    pub async fn get_assets(
        &self,
        request: Option<&AssetInfoRequest>,
    ) -> Result<HashMap<String, AssetInfo>, KrakenError> {
        match request {
            Some(req) => self.public_get(public::ASSETS, req).await,
            None => self.public_get(public::ASSETS, &()).await,
        }
    }

    /// Get tradable asset pairs.
    ///
    /// # Arguments
    ///
    /// * `request` - Optional request parameters to filter pairs.
    pub async fn get_asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> Result<HashMap<String, AssetPair>, KrakenError> {
        match request {
            Some(req) => self.public_get(public::ASSET_PAIRS, req).await,
            None => self.public_get(public::ASSET_PAIRS, &()).await,
        }
    }

    /// Get ticker information for one or more pairs.
    ///
    /// Today's prices start at midnight UTC.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Comma-separated list of pairs (e.g., "XBTUSD,ETHUSD").
    ///   An empty string returns tickers for every tradable pair.
    pub async fn get_ticker(&self, pairs: &str) -> Result<HashMap<String, TickerInfo>, KrakenError> {
        #[derive(serde::Serialize)]
        struct Params<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            pair: Option<&'a str>,
        }
        let params = Params {
            pair: (!pairs.is_empty()).then_some(pairs),
        };
        self.public_get(public::TICKER, &params).await
    }

    /// Get OHLC (candlestick) data.
    ///
    /// The last entry is the current, not-yet-committed frame.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `pair` is blank.
    pub async fn get_ohlc(&self, request: &OhlcRequest) -> Result<OhlcResponse, KrakenError> {
        require(&request.pair, "pair")?;
        self.public_get(public::OHLC, request).await
    }

    /// Get order book for a pair.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidRequest`] if `pair` is blank or `count`
    /// is outside 1..=500.
    pub async fn get_order_book(
        &self,
        request: &OrderBookRequest,
    ) -> Result<HashMap<String, OrderBook>, KrakenError> {
        require(&request.pair, "pair")?;
        if let Some(count) = request.count {
            if count == 0 || count > MAX_ORDER_BOOK_COUNT {
                return Err(KrakenError::InvalidRequest(format!(
                    "count must be between 1 and {MAX_ORDER_BOOK_COUNT}"
                )));
            }
        }
        self.public_get(public::DEPTH, request).await
    }
}
