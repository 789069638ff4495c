//! Measure the clock offset of every known endpoint.
//!
//! ```shell
//! RUST_LOG=debug cargo run --example time
//! ```

use anyhow::Result;
use ovh::{Client, Endpoint};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    for endpoint in Endpoint::ALL {
        let client = Client::new(endpoint, "", "", "");
        match client.poll_timeshift().await {
            Ok(offset) => println!("{endpoint:<14} {offset}"),
            Err(e) => eprintln!("{endpoint:<14} failed: {e}"),
        }
    }

    Ok(())
}
