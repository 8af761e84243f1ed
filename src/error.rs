//! Error types for the Kraken client library.

use thiserror::Error;

/// The main error type for all Kraken client operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request parameters could not be form encoded
    #[error("URL encoding error: {0}")]
    UrlEncoding(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Kraken API returned an error
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// A required request field is missing or out of range.
    ///
    /// Raised locally, before anything is sent to the exchange.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl KrakenError {
    /// Get the API error if this is an exchange-reported failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KrakenError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Kraken API error codes and messages.
///
/// These are errors returned by the Kraken API itself in the response body.
/// Kraken may report several errors for one request; all of them are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The category of the first reported error (e.g., "EGeneral")
    pub code: String,
    /// The message of the first reported error (e.g., "Invalid arguments")
    pub message: String,
    /// Every error string exactly as reported by Kraken.
    pub errors: Vec<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            write!(f, "{}", self.full_code())
        } else {
            write!(f, "{}", self.errors.join(", "))
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        let errors = vec![format!("{}:{}", code, message)];
        Self {
            code,
            message,
            errors,
        }
    }

    /// Parse API error from Kraken's error array format.
    ///
    /// Kraken returns errors as an array like `["EGeneral:Invalid arguments"]`.
    /// Returns `None` for an empty array.
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        let first = errors.first()?;

        // Kraken errors are in format "ECategory:Message"
        let (code, message) = match first.split_once(':') {
            Some((code, message)) => (code.to_string(), message.to_string()),
            None => ("Unknown".to_string(), first.clone()),
        };

        Some(Self {
            code,
            message,
            errors: errors.to_vec(),
        })
    }

    /// Get the full error string in Kraken's format (code:message).
    pub fn full_code(&self) -> String {
        format!("{}:{}", self.code, self.message)
    }

    /// Check whether any reported error matches `category` and contains `text`.
    fn any(&self, category: &str, text: &str) -> bool {
        self.errors.iter().any(|e| match e.split_once(':') {
            Some((code, message)) => code == category && message.contains(text),
            None => false,
        })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.any("EAPI", "Rate limit") || self.any("EOrder", "Rate limit")
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.any("EAPI", "Invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.any("EAPI", "Invalid key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.any("EAPI", "Invalid signature")
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.any("EGeneral", "Permission denied")
    }

    /// Check if this is a service unavailable error.
    pub fn is_service_unavailable(&self) -> bool {
        self.any("EService", "Unavailable") || self.any("EService", "Busy")
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    /// General errors
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";
    pub const INTERNAL_ERROR: &str = "EGeneral:Internal error";

    /// API errors
    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const INVALID_OTP: &str = "EAPI:Invalid OTP";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";

    /// Order errors
    pub const ORDER_RATE_LIMIT: &str = "EOrder:Rate limit exceeded";
    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const INVALID_ORDER: &str = "EOrder:Invalid order";
    pub const ORDER_NOT_FOUND: &str = "EOrder:Unknown order";

    /// Service errors
    pub const SERVICE_UNAVAILABLE: &str = "EService:Unavailable";
    pub const SERVICE_BUSY: &str = "EService:Busy";

    /// Query errors
    pub const UNKNOWN_ASSET_PAIR: &str = "EQuery:Unknown asset pair";
}
