use restaurant_server::{Config, Server, init_logger, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env is optional
    let dotenv = dotenvy::dotenv();

    // 2. Load configuration; a bad one aborts before anything binds
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logger();
            tracing::error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    // 3. Logging
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    if let Err(e) = dotenv {
        tracing::debug!("No .env loaded: {}", e);
    }
    tracing::info!("Restaurant server starting...");

    // 4. Serve until ctrl-c
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
