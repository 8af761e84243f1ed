//! Kraken Spot REST API client implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Request};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{CredentialsProvider, FormBody, IncreasingNonce, JsonBody, NonceProvider, RequestBody};
use crate::error::{ApiError, KrakenError};
use crate::spot::rest::context::RequestContext;
use crate::spot::rest::endpoints::KRAKEN_BASE_URL;
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
use crate::spot::rest::traits::KrakenClient;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");
const API_SIGN_HEADER: HeaderName = HeaderName::from_static("api-sign");

const PUBLIC_SCOPE: &str = "public";
const PRIVATE_SCOPE: &str = "private";

/// The Kraken Spot REST API client.
///
/// Public endpoints are plain GET requests. Private endpoints are POSTed with
/// a signed body: every call draws a fresh nonce, optionally adds the OTP from
/// its [`RequestContext`], and signs the exact bytes that go on the wire.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_rest_client::spot::rest::SpotRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client for public endpoints only
///     let client = SpotRestClient::new();
///
///     let status = client.get_system_status().await?;
///     println!("Status: {:?}", status.status);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use kraken_rest_client::auth::StaticCredentials;
/// use kraken_rest_client::spot::rest::{RequestContext, SpotRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "c2VjcmV0"));
///     let client = SpotRestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let ctx = RequestContext::new().with_otp("123456");
///     let balance = client.get_account_balance(&ctx).await?;
///     println!("Balance: {:?}", balance);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SpotRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl SpotRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`SpotRestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> SpotRestClientBuilder {
        SpotRestClientBuilder::new()
    }

    /// The versioned base URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a form body for a private call, stamped with a fresh nonce.
    pub fn new_form_body<P>(&self, params: &P) -> Result<FormBody, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        FormBody::from_params(params, self.nonce_provider.next_nonce())
    }

    /// Create a JSON body for a private call, stamped with a fresh nonce.
    pub fn new_json_body<P>(&self, params: &P) -> Result<JsonBody, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        JsonBody::from_params(params, self.nonce_provider.next_nonce())
    }

    /// Build an unsigned GET request for a public endpoint.
    ///
    /// `query` is form encoded into the query string; `&()` sends none.
    pub fn build_public_request<Q>(&self, endpoint: &str, query: &Q) -> Result<Request, KrakenError>
    where
        Q: Serialize + ?Sized,
    {
        let mut url = self.endpoint_url(PUBLIC_SCOPE, endpoint)?;
        let query = serde_urlencoded::to_string(query)?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        let mut request = Request::new(Method::GET, url);
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        tracing::debug!("Built public request for {}", endpoint);
        Ok(request)
    }

    /// Build a signed request for a private endpoint.
    ///
    /// The OTP from `ctx` (if any) is added to the body before signing. The
    /// signature covers the URL path only, e.g. `/0/private/AddOrder`.
    ///
    /// # Errors
    ///
    /// - [`KrakenError::MissingCredentials`] if the client has no credentials.
    /// - [`KrakenError::Auth`] if the secret is not valid base64 or a header
    ///   value cannot be encoded.
    /// - [`KrakenError::Url`] if the endpoint does not form a valid URL.
    pub fn build_private_request<B>(
        &self,
        ctx: &RequestContext,
        method: Method,
        endpoint: &str,
        mut body: B,
    ) -> Result<Request, KrakenError>
    where
        B: RequestBody,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(KrakenError::MissingCredentials)?
            .get_credentials();
        let signer = credentials.signer()?;

        let url = self.endpoint_url(PRIVATE_SCOPE, endpoint)?;

        if let Some(otp) = ctx.otp() {
            body.set_otp(otp.expose());
        }
        let rendered = body.render();
        let signature = signer.sign(&body, url.path())?;

        let api_key = HeaderValue::from_str(&credentials.api_key)
            .map_err(|_| KrakenError::Auth("API key is not a valid header value.".to_string()))?;
        let mut api_sign = HeaderValue::from_str(&signature)
            .map_err(|_| KrakenError::Auth("Signature is not a valid header value.".to_string()))?;
        api_sign.set_sensitive(true);

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(API_SIGN_HEADER, api_sign);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(body.content_type()));
        *request.body_mut() = Some(rendered.into());
        *request.timeout_mut() = ctx.timeout();

        tracing::debug!(
            "Built private request for {} ({})",
            endpoint,
            body.content_type()
        );
        Ok(request)
    }

    /// Make a public GET request.
    pub(crate) async fn public_get<T, Q>(&self, endpoint: &str, params: &Q) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.build_public_request(endpoint, params)?;
        self.execute(request).await
    }

    /// Make an authenticated POST request with a form-encoded body.
    pub(crate) async fn private_form<T, P>(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        params: &P,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = self.new_form_body(params)?;
        self.private_request(ctx, endpoint, body).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub(crate) async fn private_json<T, P>(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        params: &P,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = self.new_json_body(params)?;
        self.private_request(ctx, endpoint, body).await
    }

    /// Sign and send a prepared body to a private endpoint.
    pub(crate) async fn private_request<T, B>(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        body: B,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        B: RequestBody,
    {
        let request = self.build_private_request(ctx, Method::POST, endpoint, body)?;
        self.execute(request).await
    }

    fn endpoint_url(&self, scope: &str, endpoint: &str) -> Result<Url, KrakenError> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&format!("{}/{}", scope, endpoint))?)
    }

    async fn execute<T>(&self, request: Request) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
    {
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!("Sending {} {}", method, path);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| match e {
                reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => KrakenError::Timeout,
                other => KrakenError::HttpMiddleware(other),
            })?;

        tracing::debug!("Received {} for {} {}", response.status(), method, path);
        self.parse_response(response).await
    }

    /// Parse a response from the Kraken API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                KrakenError::Timeout
            } else {
                KrakenError::Http(e)
            }
        })?;

        // Kraken reports most failures inside a 200 envelope. Errors are read
        // first since `result` may be partial or empty when they are present.
        let errors: KrakenErrors = serde_json::from_str(&body).map_err(|e| {
            KrakenError::InvalidResponse(format!("HTTP {}: failed to parse response: {}", status, e))
        })?;

        if let Some(api_error) = ApiError::from_error_array(&errors.error) {
            tracing::warn!("Kraken API error: {}", api_error);
            return Err(KrakenError::Api(api_error));
        }

        let parsed: KrakenResponse<T> = serde_json::from_str(&body).map_err(|e| {
            KrakenError::InvalidResponse(format!("Failed to parse result: {}", e))
        })?;

        parsed.result.ok_or_else(|| {
            if !status.is_success() {
                KrakenError::InvalidResponse(format!("HTTP {}: {}", status, body))
            } else {
                KrakenError::InvalidResponse("Response missing 'result' field".to_string())
            }
        })
    }
}

impl Default for SpotRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpotRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`SpotRestClient`].
pub struct SpotRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl SpotRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the versioned base URL (useful for testing with a mock server).
    ///
    /// A trailing `/` is added when missing, so `http://host/0` and
    /// `http://host/0/` are equivalent.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a default timeout for every request.
    ///
    /// [`RequestContext::with_timeout`] overrides it per call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Requests are never retried: a signed body carries a single-use nonce.
    pub fn build(self) -> SpotRestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-rest-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kraken-rest-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "HTTP client configuration rejected, using defaults");
            reqwest::Client::new()
        });

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        SpotRestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
        }
    }
}

impl Default for SpotRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Error list of a Kraken response envelope.
#[derive(Debug, serde::Deserialize)]
struct KrakenErrors {
    #[serde(default)]
    error: Vec<String>,
}

/// Result of a Kraken response envelope.
#[derive(Debug, serde::Deserialize)]
struct KrakenResponse<T> {
    result: Option<T>,
}

// KrakenClient trait implementation.

impl KrakenClient for SpotRestClient {
    // ========== Public Endpoints ==========

    async fn get_server_time(&self) -> Result<ServerTime, KrakenError> {
        SpotRestClient::get_server_time(self).await
    }

    async fn get_system_status(&self) -> Result<SystemStatus, KrakenError> {
        SpotRestClient::get_system_status(self).await
    }

    async fn get_assets(
        &self,
        request: Option<&AssetInfoRequest>,
    ) -> Result<HashMap<String, AssetInfo>, KrakenError> {
        SpotRestClient::get_assets(self, request).await
    }

    async fn get_asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> Result<HashMap<String, AssetPair>, KrakenError> {
        SpotRestClient::get_asset_pairs(self, request).await
    }

    async fn get_ticker(&self, pairs: &str) -> Result<HashMap<String, TickerInfo>, KrakenError> {
        SpotRestClient::get_ticker(self, pairs).await
    }

    async fn get_ohlc(&self, request: &OhlcRequest) -> Result<OhlcResponse, KrakenError> {
        SpotRestClient::get_ohlc(self, request).await
    }

    async fn get_order_book(
        &self,
        request: &OrderBookRequest,
    ) -> Result<HashMap<String, OrderBook>, KrakenError> {
        SpotRestClient::get_order_book(self, request).await
    }

    // ========== Private Endpoints - Account ==========

    async fn get_account_balance(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, Decimal>, KrakenError> {
        SpotRestClient::get_account_balance(self, ctx).await
    }

    async fn get_extended_balance(
        &self,
        ctx: &RequestContext,
    ) -> Result<ExtendedBalances, KrakenError> {
        SpotRestClient::get_extended_balance(self, ctx).await
    }

    // ========== Private Endpoints - Trading ==========

    async fn add_order(
        &self,
        ctx: &RequestContext,
        request: &AddOrderRequest,
    ) -> Result<AddOrderResponse, KrakenError> {
        SpotRestClient::add_order(self, ctx, request).await
    }

    async fn cancel_order(
        &self,
        ctx: &RequestContext,
        request: &CancelOrderRequest,
    ) -> Result<CancelOrderResponse, KrakenError> {
        SpotRestClient::cancel_order(self, ctx, request).await
    }

    async fn cancel_all_orders(
        &self,
        ctx: &RequestContext,
    ) -> Result<CancelOrderResponse, KrakenError> {
        SpotRestClient::cancel_all_orders(self, ctx).await
    }

    async fn cancel_all_orders_after(
        &self,
        ctx: &RequestContext,
        request: &CancelAllOrdersAfterRequest,
    ) -> Result<CancelAllOrdersAfter, KrakenError> {
        SpotRestClient::cancel_all_orders_after(self, ctx, request).await
    }

    // ========== Private Endpoints - Subaccounts ==========

    async fn create_subaccount(
        &self,
        ctx: &RequestContext,
        request: &CreateSubaccountRequest,
    ) -> Result<bool, KrakenError> {
        SpotRestClient::create_subaccount(self, ctx, request).await
    }

    async fn account_transfer(
        &self,
        ctx: &RequestContext,
        request: &AccountTransferRequest,
    ) -> Result<AccountTransfer, KrakenError> {
        SpotRestClient::account_transfer(self, ctx, request).await
    }

    // ========== Private Endpoints - Earn ==========

    async fn earn_allocate(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocateRequest,
    ) -> Result<bool, KrakenError> {
        SpotRestClient::earn_allocate(self, ctx, request).await
    }

    async fn earn_deallocate(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocateRequest,
    ) -> Result<bool, KrakenError> {
        SpotRestClient::earn_deallocate(self, ctx, request).await
    }

    async fn get_earn_allocation_status(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocationStatusRequest,
    ) -> Result<AllocationStatus, KrakenError> {
        SpotRestClient::get_earn_allocation_status(self, ctx, request).await
    }

    async fn get_earn_deallocation_status(
        &self,
        ctx: &RequestContext,
        request: &EarnAllocationStatusRequest,
    ) -> Result<AllocationStatus, KrakenError> {
        SpotRestClient::get_earn_deallocation_status(self, ctx, request).await
    }

    async fn list_earn_strategies(
        &self,
        ctx: &RequestContext,
        request: Option<&EarnStrategiesRequest>,
    ) -> Result<EarnStrategies, KrakenError> {
        SpotRestClient::list_earn_strategies(self, ctx, request).await
    }

    async fn list_earn_allocations(
        &self,
        ctx: &RequestContext,
        request: Option<&EarnAllocationsRequest>,
    ) -> Result<EarnAllocations, KrakenError> {
        SpotRestClient::list_earn_allocations(self, ctx, request).await
    }

    // ========== Private Endpoints - WebSocket ==========

    async fn get_websocket_token(
        &self,
        ctx: &RequestContext,
    ) -> Result<WebSocketToken, KrakenError> {
        SpotRestClient::get_websocket_token(self, ctx).await
    }
}
