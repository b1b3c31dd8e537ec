use callpathd::application::CallPathService;
use callpathd::config::Config;
use callpathd::domain::shared::DeviceEndpoint;
use callpathd::infrastructure::audio::AlsaBackend;
use callpathd::infrastructure::bus::{self, CallSignals};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parse the single positional `hw:<card>,<device>` argument.
///
/// Any other argument count or an unparsable form prints usage and
/// exits with status 1, before any bus activity.
fn endpoint_from_args() -> DeviceEndpoint {
    let mut args = std::env::args().skip(1);
    let endpoint = args.next().and_then(|arg| arg.parse().ok());

    match (endpoint, args.next()) {
        (Some(endpoint), None) => endpoint,
        _ => {
            eprintln!("Usage: callpathd hw:<card>,<device>");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let endpoint = endpoint_from_args();
    let config = Config::load(endpoint)?;
    info!("managing voice PCM pair on {}", config.endpoint);

    let connection = bus::connect_system().await?;
    let signals = CallSignals::subscribe(&connection).await?;
    info!("subscribed to oFono and ModemManager call signals");

    let mut service = CallPathService::new(&config, AlsaBackend);
    service.run(signals).await;

    Ok(())
}
