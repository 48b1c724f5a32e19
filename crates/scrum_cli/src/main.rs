//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `scrum_core` linkage, config loading and database bootstrap.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `scrum_cli [config.json]`

use scrum_core::{CoreConfig, SqliteUserRepository, UserService};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("scrum_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    config.init_logging()?;

    let conn = config.open_db()?;
    let service = UserService::new(SqliteUserRepository::try_new(&conn)?);
    let users = service.get_all_users()?;
    log::info!("event=cli_probe module=cli status=ok user_count={}", users.len());

    println!("scrum_core version={}", scrum_core::core_version());
    println!("scrum_core users={}", users.len());
    Ok(())
}
