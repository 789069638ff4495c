use std::env;

use log::{debug, warn};
use ovh::{Client, Endpoint};

fn live_enabled() -> bool {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    env::var("OVH_TEST").map(|v| v == "on").unwrap_or(false)
}

#[tokio::test]
async fn test_poll_timeshift_on_every_endpoint() -> anyhow::Result<()> {
    if !live_enabled() {
        warn!("OVH_TEST is not set, skipped");
        return Ok(());
    }

    for endpoint in Endpoint::ALL {
        let client = Client::new(endpoint, "", "", "");
        let offset = client.poll_timeshift().await?;
        debug!("clock offset of {endpoint}: {offset}");
    }

    Ok(())
}

#[tokio::test]
async fn test_get_me() -> anyhow::Result<()> {
    if !live_enabled() {
        warn!("OVH_TEST is not set, skipped");
        return Ok(());
    }

    let client = Client::from_env().expect("env OVH_ENDPOINT and credentials must set");
    client.poll_timeshift().await?;

    let me = client.get("/me").await?;
    debug!("got me: {me}");
    assert!(me["nichandle"].is_string());

    Ok(())
}
