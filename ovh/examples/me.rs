//! Print the account behind the configured consumer key.
//!
//! Reads `OVH_ENDPOINT`, `OVH_APPLICATION_KEY`, `OVH_APPLICATION_SECRET` and
//! `OVH_CONSUMER_KEY`, from the environment or a `.env` file.
//!
//! ```shell
//! cargo run --example me
//! ```

use anyhow::Result;
use ovh::blocking::Client;
use ovh::ErrorKind;

fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();
    let _ = dotenv::dotenv();

    let client = Client::from_env()?;
    client.poll_timeshift()?;

    match client.get("/me") {
        Ok(me) => println!("{}", serde_json::to_string_pretty(&me)?),
        Err(e) if e.kind() == ErrorKind::Api => {
            eprintln!("{e}");
            if let Some(body) = e.body() {
                eprintln!("{body}");
            }
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
