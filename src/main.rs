use carlog::commands::Cli;
use carlog::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "carlog=info".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = Cli::menu().await {
        msg_error!(format!("{:#}", e));
        std::process::exit(1);
    }
}
