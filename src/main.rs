use plant_cart::{ApiClient, App, WidgetConfig, render_document};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = WidgetConfig::from_env();
    let client = ApiClient::new(&config.api_base)?;
    info!("loading catalog from {}", client.base());

    let mut app = App::new(client, &config);
    app.load_initial().await;

    println!("{}", render_document(app.page()));
    Ok(())
}
