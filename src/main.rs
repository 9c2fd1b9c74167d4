use anyhow::Result;
use log::info;

use cmedicas::api::server;
use cmedicas::api::AppState;
use cmedicas::config::Config;
use cmedicas::logger;
use cmedicas::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    if let Some(flag) = args.next() {
        if flag == "--generate-config" {
            let path: std::path::PathBuf = match args.next() {
                Some(path) => path.into(),
                None => Config::get_default_config_path()?,
            };
            Config::generate_default_config(&path)?;
            return Ok(());
        }
        eprintln!("❌ Unknown argument: {flag}");
        eprintln!("\n💡 Usage: cmedicas [--generate-config [PATH]]");
        std::process::exit(2);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            eprintln!("\n💡 Set JWT_SECRET or write a config file with `cmedicas --generate-config`.");
            std::process::exit(1);
        }
    };

    if let Err(e) = logger::init(&config.logging) {
        eprintln!("⚠️  Logging disabled: {e:#}");
    }

    let storage = Storage::connect(&config.database).await?;
    storage.init_schema().await?;
    if let Some(admin) = &config.auth.bootstrap_admin {
        storage.ensure_admin(admin, config.auth.password_iterations).await?;
    }

    let state = AppState::new(storage, &config.auth);
    info!("Starting cmedicas v{}", env!("CARGO_PKG_VERSION"));
    server::serve(&config, state).await
}
