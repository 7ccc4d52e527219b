use quietpix_serve::{app, config::ALLOWED_ORIGINS_ENV, ServeArgs, ServeConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: ServeArgs = argh::from_env();
    let env_origins = std::env::var(ALLOWED_ORIGINS_ENV).ok();
    let config = ServeConfig::resolve(args, env_origins.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

    log::info!("🚀 Starting the server");
    log::info!("🔥 Listening on: http://{}", listener.local_addr()?);
    log::info!("🌐 Allowed origins: {}", config.allowed_origins.join(", "));
    log::info!("🔧 Press Ctrl+C to stop the server");

    axum::serve(listener, app(&config)).await?;

    Ok(())
}
