use clap::Parser;
use stickies::{App, Store, config::Config, logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    logging::init(config.log_file.as_deref())?;

    let store = Store::open(&config.store)?;
    if config.reset {
        store.clear()?;
    }
    let mut app = App::new(store)?;
    ratatui::run(|t| app.run(t))?;

    Ok(())
}
