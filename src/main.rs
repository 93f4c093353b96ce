// Entrypoint for the terminal portfolio.
// - Keeps `main` small: read config, start logging, hand the client to the UI loop.
// - Logging failures are reported and ignored; the UI works without file logs.

use termfolio::{api::ApiClient, config::Config, logging::init_logging, ui::main_menu};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    if let Err(e) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Logging disabled: {e}");
    }

    let api = ApiClient::new(&config)?;

    // Blocks until the user picks "Exit".
    main_menu(&config, api)?;
    Ok(())
}
