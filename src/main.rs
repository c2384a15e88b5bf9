use anyhow::Context;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatbot_client::{ClientConfig, HttpTransport, SessionEnd, run_conversation};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with the conversation on stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let transport = HttpTransport::new(&config).context("could not build HTTP client")?;
    tracing::info!(endpoint = transport.endpoint(), "chatbot client ready");

    let mut input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    let end = run_conversation(&mut input, &mut output, &transport)
        .await
        .context("console I/O failed")?;

    match end {
        SessionEnd::Bye | SessionEnd::InputClosed => tracing::debug!(?end, "session finished"),
        SessionEnd::RequestFailed => tracing::debug!("session aborted after request error"),
    }

    Ok(())
}
