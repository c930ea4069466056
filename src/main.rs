mod run;

use anyhow::Result;
use splitbudget::config::Config;
use splitbudget::db::Database;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    init_logging(&config.log_filter);

    let db = Database::open(&config.db_path)?;
    tracing::debug!(db = %config.db_path.display(), user = %config.user_id, "Opened database");

    if args.len() < 2 {
        run::print_usage();
        return Ok(());
    }
    run::as_cli(&args, &db, &config)
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
