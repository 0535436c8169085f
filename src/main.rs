use anyhow::Context;
use heartbeat::configuration::get_configuration;
use heartbeat::startup::Application;
use heartbeat::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("heartbeat".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber).context("Failed to initialise telemetry.")?;

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let application =
        Application::build(configuration).context("Failed to start the server.")?;
    application.run_until_stopped().await?;
    Ok(())
}
