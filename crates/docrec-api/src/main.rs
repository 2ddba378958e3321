use docrec_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, backends, routes)
    let (_state, router) = docrec_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    docrec_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
