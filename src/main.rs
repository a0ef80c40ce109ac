use clap::Parser;
use comiccrafter::config::{AppConfig, setup_logging};
use tracing::error;

#[tokio::main(flavor = "multi_thread", worker_threads = 32)]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = comiccrafter::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let listen_address = cli.listen_address.clone();
    let port = cli.port;

    let config = match AppConfig::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            error!("Startup error: {}", err);
            return;
        }
    };

    let font_bytes = match std::fs::read(&config.caption_font) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(
                "Failed to read caption font {}: {}",
                config.caption_font.display(),
                err
            );
            return;
        }
    };

    if let Err(err) = comiccrafter::web::setup_server(&listen_address, port, config, font_bytes).await
    {
        error!("Application error: {}", err);
    }
}
