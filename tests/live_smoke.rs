use std::sync::Arc;

use kraken_rest_client::auth::EnvCredentials;
use kraken_rest_client::spot::rest::{RequestContext, SpotRestClient};

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_spot_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = SpotRestClient::new();
    let time = client.get_server_time().await?;
    assert!(time.unixtime > 0);

    let _status = client.get_system_status().await?;

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_spot_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let client = SpotRestClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    // Accounts with 2FA on API keys can set KRAKEN_API_OTP.
    let mut ctx = RequestContext::new();
    if let Ok(otp) = std::env::var("KRAKEN_API_OTP") {
        ctx = ctx.with_otp(otp);
    }

    let _balances = client.get_account_balance(&ctx).await?;
    let token = client.get_websocket_token(&ctx).await?;
    assert!(!token.token.is_empty());

    Ok(())
}
