use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verimock::config::DEFAULT_SALT;
use verimock::crypto::digest::salted_digest;
use verimock::{VerificationRequest, VerificationService, VerimockConfig, VerimockError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the mock verification server
    Serve {
        /// Path to a TOML fixture file
        #[arg(short, long, value_name = "FILE", env = "VERIMOCK_CONFIG")]
        config: Option<PathBuf>,

        /// Listen address:port
        #[arg(short, long, env = "VERIMOCK_LISTEN")]
        listen: Option<SocketAddr>,

        /// Shared secret used to authenticate callbacks
        #[arg(short, long, env = "VERIMOCK_SALT")]
        salt: Option<String>,
    },

    /// Print a signed callback query string
    Sign {
        #[arg(long)]
        partnerid: String,

        #[arg(long)]
        url: String,

        #[arg(long)]
        useragent: String,

        #[arg(long)]
        ip: String,

        /// Shared secret
        #[arg(short, long, default_value = DEFAULT_SALT, env = "VERIMOCK_SALT")]
        salt: String,

        /// Callback path included in the digest
        #[arg(long, default_value = verimock::config::DEFAULT_CALLBACK_PATH)]
        path: String,
    },

    /// Print sha256(data + salt) as lowercase hex
    Hash {
        #[arg(long)]
        data: String,

        #[arg(long)]
        salt: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), VerimockError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            listen,
            salt,
        } => {
            let mut config = match config {
                Some(path) => {
                    info!("Loading fixtures from {}", path.display());
                    VerimockConfig::from_file(&path)?
                }
                None => VerimockConfig::default(),
            };
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            if let Some(salt) = salt {
                config.salt = salt;
            }

            verimock::server::serve(config).await?;
        }

        Commands::Sign {
            partnerid,
            url,
            useragent,
            ip,
            salt,
            path,
        } => {
            let service = VerificationService::new(VerimockConfig {
                salt,
                callback_path: path,
                ..Default::default()
            })?;
            let request = VerificationRequest {
                url,
                ip,
                partner_id: partnerid,
                user_agent: useragent,
            };
            println!("{}", service.sign_callback(&request));
        }

        Commands::Hash { data, salt } => {
            println!("{}", salted_digest(&data, &salt));
        }
    }

    Ok(())
}
