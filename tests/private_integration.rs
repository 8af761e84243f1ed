use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_rest_client::KrakenError;
use kraken_rest_client::auth::{FormBody, NonceProvider, RequestBody, Signer, StaticCredentials};
use kraken_rest_client::spot::rest::private::{
    AccountTransferRequest, AddOrderRequest, CancelAllOrdersAfterRequest, CancelOrderRequest,
    CreateSubaccountRequest, EarnAllocateRequest, EarnAllocationStatusRequest,
    EarnStrategiesRequest, TransferStatus,
};
use kraken_rest_client::spot::rest::{KrakenClient, RequestContext, SpotRestClient};
use kraken_rest_client::types::{BuySell, OrderType};

const SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

struct FixedNonce(u64);

impl NonceProvider for FixedNonce {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build_client(server: &MockServer) -> SpotRestClient {
    init_tracing();
    SpotRestClient::builder()
        .base_url(format!("{}/0/", server.uri()))
        .credentials(Arc::new(StaticCredentials::new("test_key", SECRET)))
        .nonce_provider(Arc::new(FixedNonce(1616492376594)))
        .build()
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": [], "result": result }))
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[tokio::test]
async fn test_add_order_is_signed_over_sent_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/AddOrder"))
        .and(header("API-Key", "test_key"))
        .and(header(
            "API-Sign",
            "4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32bAb0nmbRn6H8ndwLUQ==",
        ))
        .and(header(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=utf-8",
        ))
        .and(body_string(
            "nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25",
        ))
        .respond_with(ok(serde_json::json!({
            "descr": { "order": "buy 1.25 XBTUSD @ limit 37500" },
            "txid": ["OUF4EM-FRGI2-MQMWZD"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = AddOrderRequest::new("XBTUSD", BuySell::Buy, OrderType::Limit, dec("1.25"))
        .price(dec("37500"));
    let response = client
        .add_order(&RequestContext::default(), &request)
        .await
        .unwrap();

    assert_eq!(response.descr.order, "buy 1.25 XBTUSD @ limit 37500");
    assert_eq!(response.txid.unwrap(), vec!["OUF4EM-FRGI2-MQMWZD"]);
}

#[tokio::test]
async fn test_otp_is_sent_once_in_form_body() {
    let server = MockServer::start().await;

    let mut expected = FormBody::new(1616492376594);
    expected.set_otp("123456");
    let signature = Signer::new(SECRET)
        .unwrap()
        .sign(&expected, "/0/private/Balance")
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .and(body_string("nonce=1616492376594&otp=123456"))
        .and(header("API-Sign", signature.as_str()))
        .respond_with(ok(serde_json::json!({ "ZUSD": "171288.6158", "XXBT": "0.0011" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::new().with_otp("123456");
    let balances = client.get_account_balance(&ctx).await.unwrap();

    assert_eq!(balances["ZUSD"], dec("171288.6158"));
    assert_eq!(balances["XXBT"], dec("0.0011"));
}

#[tokio::test]
async fn test_earn_status_uses_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Earn/AllocateStatus"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(
            r#"{"nonce":"1616492376594","otp":"654321","strategy_id":"ESRFUO3-Q62XD-WIOIL7"}"#,
        ))
        .respond_with(ok(serde_json::json!({ "pending": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::new().with_otp("654321");
    let status = client
        .get_earn_allocation_status(&ctx, &EarnAllocationStatusRequest::new("ESRFUO3-Q62XD-WIOIL7"))
        .await
        .unwrap();

    assert!(status.pending);
}

#[tokio::test]
async fn test_earn_allocate_sends_amount_as_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Earn/Allocate"))
        .and(body_string(
            r#"{"amount":"10.5","nonce":"1616492376594","strategy_id":"ESRFUO3-Q62XD-WIOIL7"}"#,
        ))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let allocated = client
        .earn_allocate(
            &RequestContext::default(),
            &EarnAllocateRequest::new(dec("10.5"), "ESRFUO3-Q62XD-WIOIL7"),
        )
        .await
        .unwrap();

    assert!(allocated);
}

#[tokio::test]
async fn test_list_earn_strategies_without_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Earn/Strategies"))
        .and(body_string(r#"{"limit":5,"nonce":"1616492376594"}"#))
        .respond_with(ok(serde_json::json!({ "items": [], "next_cursor": null })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = EarnStrategiesRequest {
        limit: Some(5),
        ..Default::default()
    };
    let strategies = client
        .list_earn_strategies(&RequestContext::default(), Some(&request))
        .await
        .unwrap();

    assert!(strategies.items.is_empty());
    assert!(strategies.next_cursor.is_none());
}

#[tokio::test]
async fn test_api_error_is_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/CancelOrder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EGeneral:Invalid arguments"],
            "result": {}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .cancel_order(&RequestContext::default(), &CancelOrderRequest::new("OXXXX"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("EGeneral:Invalid arguments"));
    let api_error = err.api_error().expect("should be an API error");
    assert_eq!(api_error.code, "EGeneral");
    assert_eq!(api_error.message, "Invalid arguments");
}

#[tokio::test]
async fn test_missing_required_fields_never_reach_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ok(serde_json::json!(true)))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::default();

    let err = client
        .create_subaccount(&ctx, &CreateSubaccountRequest::new("", "trader@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, KrakenError::InvalidRequest(_)));

    let err = client
        .cancel_order(&ctx, &CancelOrderRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, KrakenError::InvalidRequest(_)));

    let err = client
        .add_order(
            &ctx,
            &AddOrderRequest::new("", BuySell::Sell, OrderType::Market, dec("1")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, KrakenError::InvalidRequest(_)));

    let err = client
        .get_earn_deallocation_status(&ctx, &EarnAllocationStatusRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, KrakenError::InvalidRequest(_)));

    let err = client
        .account_transfer(
            &ctx,
            &AccountTransferRequest::new("XBT", dec("0.1"), "", "subaccount"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, KrakenError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_create_subaccount() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/CreateSubaccount"))
        .and(body_string_contains("email=trader%40example.com"))
        .and(body_string_contains("username=trader"))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let created = client
        .create_subaccount(
            &RequestContext::default(),
            &CreateSubaccountRequest::new("trader", "trader@example.com"),
        )
        .await
        .unwrap();

    assert!(created);
}

#[tokio::test]
async fn test_account_transfer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/AccountTransfer"))
        .and(body_string(
            "amount=0.1&asset=XBT&from=master&nonce=1616492376594&to=subaccount",
        ))
        .respond_with(ok(serde_json::json!({
            "transfer_id": "TOH3AS2-LPCWR8-JDQGEU",
            "status": "complete"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let transfer = client
        .account_transfer(
            &RequestContext::default(),
            &AccountTransferRequest::new("XBT", dec("0.1"), "master", "subaccount"),
        )
        .await
        .unwrap();

    assert_eq!(transfer.transfer_id, "TOH3AS2-LPCWR8-JDQGEU");
    assert_eq!(transfer.status, TransferStatus::Complete);
}

#[tokio::test]
async fn test_cancel_all_orders_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/CancelAllOrdersAfter"))
        .and(body_string("nonce=1616492376594&timeout=60"))
        .respond_with(ok(serde_json::json!({
            "currentTime": "2023-03-24T17:41:56Z",
            "triggerTime": "2023-03-24T17:42:56Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let state = client
        .cancel_all_orders_after(
            &RequestContext::default(),
            &CancelAllOrdersAfterRequest::new(Duration::from_secs(60)),
        )
        .await
        .unwrap();

    assert!(state.is_armed());
    assert_eq!(state.trigger_time, "2023-03-24T17:42:56Z");
}

#[tokio::test]
async fn test_websocket_token_through_trait() {
    async fn token<C: KrakenClient>(client: &C) -> Result<String, KrakenError> {
        let token = client.get_websocket_token(&RequestContext::default()).await?;
        Ok(token.token)
    }

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/GetWebSocketsToken"))
        .and(body_string("nonce=1616492376594"))
        .respond_with(ok(serde_json::json!({
            "token": "1Dwc4lzSwNWOAwkMdqhssNNFhs1ed606d1WcF3XfEMw",
            "expires": 900
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert_eq!(
        token(&client).await.unwrap(),
        "1Dwc4lzSwNWOAwkMdqhssNNFhs1ed606d1WcF3XfEMw"
    );
}

#[tokio::test]
async fn test_context_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ok(serde_json::json!({})).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::new().with_timeout(Duration::from_millis(100));
    let err = client.get_account_balance(&ctx).await.unwrap_err();

    assert!(matches!(err, KrakenError::Timeout));
}

#[tokio::test]
async fn test_private_call_without_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ok(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = SpotRestClient::builder()
        .base_url(format!("{}/0/", server.uri()))
        .build();
    let err = client
        .cancel_all_orders(&RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, KrakenError::MissingCredentials));
}

#[tokio::test]
async fn test_successive_calls_use_increasing_nonces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ok(serde_json::json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = SpotRestClient::builder()
        .base_url(format!("{}/0/", server.uri()))
        .credentials(Arc::new(StaticCredentials::new("test_key", SECRET)))
        .build();
    let ctx = RequestContext::default();
    client.get_account_balance(&ctx).await.unwrap();
    client.get_account_balance(&ctx).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let nonces: Vec<u64> = requests
        .iter()
        .map(|r| {
            let body = String::from_utf8(r.body.clone()).unwrap();
            let nonce = body.strip_prefix("nonce=").unwrap();
            nonce.parse().unwrap()
        })
        .collect();

    assert_eq!(nonces.len(), 2);
    assert!(nonces[0] > 0);
    assert!(nonces[1] > nonces[0]);
}
