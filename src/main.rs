use tracing::info;

use imgshelf::{Config, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = imgshelf::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        imgshelf::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!("imgshelf - image upload and browser");
    info!("Storage root: {}", config.storage.root);

    let server = match WebServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
