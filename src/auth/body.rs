//! Request bodies for authenticated Kraken requests.
//!
//! A body is signed over exactly the string it renders to, and that same
//! string is sent on the wire. Both variants therefore render
//! deterministically: form fields and JSON keys come out sorted.
//!
//! Most private endpoints take form-encoded bodies ([`FormBody`]); the Earn
//! endpoints take JSON ([`JsonBody`]). The signer only needs the
//! [`RequestBody`] capabilities and does not care which one it gets.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::KrakenError;

/// Key under which the nonce is stored in every body.
pub const NONCE_KEY: &str = "nonce";

/// Key under which the one-time password is stored.
pub const OTP_KEY: &str = "otp";

/// Content type of [`FormBody`].
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Content type of [`JsonBody`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An unsigned request payload.
pub trait RequestBody: Send {
    /// Render the canonical wire string.
    fn render(&self) -> String;

    /// The nonce stored in the body, or `""` if there is none.
    fn nonce(&self) -> &str;

    /// Add or overwrite the `otp` field.
    fn set_otp(&mut self, otp: &str);

    /// MIME type to send in the `Content-Type` header.
    fn content_type(&self) -> &'static str;
}

/// A form-encoded body.
///
/// Fields are unique by key. Rendering sorts keys and percent-escapes
/// values, e.g. `nonce=1616492376594&ordertype=limit&pair=XBTUSD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBody {
    params: BTreeMap<String, String>,
}

impl FormBody {
    /// Create a body holding only the nonce.
    pub fn new(nonce: u64) -> Self {
        Self::from_pairs(std::iter::empty::<(String, String)>(), nonce)
    }

    /// Create a body from key/value pairs.
    ///
    /// A `nonce` key among the pairs is replaced by `nonce`.
    pub fn from_pairs<I, K, V>(pairs: I, nonce: u64) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        params.insert(NONCE_KEY.to_string(), nonce.to_string());
        Self { params }
    }

    /// Create a body from a request parameter struct.
    ///
    /// The struct is form encoded with `serde_urlencoded`, so bracketed keys
    /// such as `close[ordertype]` come from the struct's serde renames.
    pub fn from_params<P>(params: &P, nonce: u64) -> Result<Self, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let encoded = serde_urlencoded::to_string(params)?;
        let pairs = url::form_urlencoded::parse(encoded.as_bytes()).into_owned();
        Ok(Self::from_pairs(pairs, nonce))
    }

    /// Get the value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }
}

impl RequestBody for FormBody {
    fn render(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    fn nonce(&self) -> &str {
        self.get(NONCE_KEY).unwrap_or_default()
    }

    fn set_otp(&mut self, otp: &str) {
        self.set(OTP_KEY, otp);
    }

    fn content_type(&self) -> &'static str {
        FORM_CONTENT_TYPE
    }
}

/// A JSON body.
///
/// Built by serializing a request struct into a JSON object, then inserting
/// the nonce (and OTP) before rendering. The nonce is always a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody {
    fields: Map<String, Value>,
}

impl JsonBody {
    /// Create a body holding only the nonce.
    pub fn new(nonce: u64) -> Self {
        Self::from_map(Map::new(), nonce)
    }

    fn from_map(mut fields: Map<String, Value>, nonce: u64) -> Self {
        fields.insert(NONCE_KEY.to_string(), Value::String(nonce.to_string()));
        Self { fields }
    }

    /// Create a body from a request parameter struct.
    ///
    /// `params` must serialize to a JSON object (or null, which gives an
    /// empty body). Fields skipped by serde do not appear in the body.
    pub fn from_params<P>(params: &P, nonce: u64) -> Result<Self, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        match serde_json::to_value(params)? {
            Value::Object(fields) => Ok(Self::from_map(fields, nonce)),
            Value::Null => Ok(Self::new(nonce)),
            other => Err(KrakenError::InvalidRequest(format!(
                "JSON request body must be an object, got {other}"
            ))),
        }
    }

    /// Get the value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl RequestBody for JsonBody {
    fn render(&self) -> String {
        // Top-level keys sorted whatever the map's own ordering is.
        let sorted: BTreeMap<&String, &Value> = self.fields.iter().collect();
        serde_json::to_string(&sorted).unwrap_or_default()
    }

    fn nonce(&self) -> &str {
        self.fields
            .get(NONCE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn set_otp(&mut self, otp: &str) {
        self.fields
            .insert(OTP_KEY.to_string(), Value::String(otp.to_string()));
    }

    fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct FakeParams {
        asset: String,
        cursor: String,
        limit: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        converted_asset: Option<String>,
    }

    fn fake_params() -> FakeParams {
        FakeParams {
            asset: "XBT".to_string(),
            cursor: "cursor".to_string(),
            limit: 10,
            converted_asset: None,
        }
    }

    #[test]
    fn test_form_body_renders_sorted_with_nonce_and_otp() {
        let mut body = FormBody::from_pairs(
            [("asset", "XBT"), ("cursor", "cursor"), ("limit", "10")],
            42,
        );
        body.set_otp("otp");

        assert_eq!(body.nonce(), "42");
        assert_eq!(body.content_type(), FORM_CONTENT_TYPE);
        assert_eq!(
            body.render(),
            "asset=XBT&cursor=cursor&limit=10&nonce=42&otp=otp"
        );
    }

    #[test]
    fn test_form_body_from_params() {
        let body = FormBody::from_params(&fake_params(), 7).unwrap();
        assert_eq!(body.render(), "asset=XBT&cursor=cursor&limit=10&nonce=7");
    }

    #[test]
    fn test_form_body_escapes_values() {
        let body = FormBody::from_pairs([("close[ordertype]", "stop-loss"), ("note", "a b&c")], 1);
        assert_eq!(
            body.render(),
            "close%5Bordertype%5D=stop-loss&nonce=1&note=a+b%26c"
        );
    }

    #[test]
    fn test_form_body_replaces_caller_nonce() {
        let body = FormBody::from_pairs([("nonce", "1"), ("pair", "XBTUSD")], 99);
        assert_eq!(body.render(), "nonce=99&pair=XBTUSD");
    }

    #[test]
    fn test_form_body_otp_set_twice_appears_once() {
        let mut body = FormBody::new(5);
        body.set_otp("111111");
        body.set_otp("123456");
        assert_eq!(body.render(), "nonce=5&otp=123456");
    }

    #[test]
    fn test_form_body_missing_nonce_is_empty() {
        let mut body = FormBody::new(5);
        body.params.remove(NONCE_KEY);
        assert_eq!(body.nonce(), "");
    }

    #[test]
    fn test_json_body_renders_sorted_with_nonce_and_otp() {
        let mut body = JsonBody::from_params(&fake_params(), 42).unwrap();
        body.set_otp("otp");

        assert_eq!(body.nonce(), "42");
        assert_eq!(body.content_type(), JSON_CONTENT_TYPE);
        assert_eq!(
            body.render(),
            r#"{"asset":"XBT","cursor":"cursor","limit":10,"nonce":"42","otp":"otp"}"#
        );
    }

    #[test]
    fn test_json_body_skips_empty_fields() {
        let body = JsonBody::from_params(&fake_params(), 1).unwrap();
        assert!(body.get("converted_asset").is_none());
        assert_eq!(body.fields.len(), 4);
    }

    #[test]
    fn test_json_body_otp_set_twice_appears_once() {
        let mut body = JsonBody::new(3);
        body.set_otp("123456");
        body.set_otp("123456");
        let rendered = body.render();
        assert_eq!(rendered.matches(r#""otp":"123456""#).count(), 1);
        assert_eq!(rendered, r#"{"nonce":"3","otp":"123456"}"#);
    }

    #[test]
    fn test_json_body_rejects_non_object() {
        let err = JsonBody::from_params(&vec![1, 2, 3], 1).unwrap_err();
        assert!(matches!(err, KrakenError::InvalidRequest(_)));
    }

    #[test]
    fn test_json_body_from_unit_is_nonce_only() {
        let body = JsonBody::from_params(&(), 8).unwrap();
        assert_eq!(body.render(), r#"{"nonce":"8"}"#);
    }
}
