use std::path::PathBuf;

use clap::Parser;

/// Command line and environment settings.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "stickies", version, about = "Sticky notes for the terminal")]
pub struct Config {
    /// SQLite file holding the notes and the theme flag.
    #[arg(long, env = "STICKIES_STORE", default_value = "stickies.db")]
    pub store: PathBuf,

    /// Append debug logs to this file. Nothing is logged when unset.
    #[arg(long, env = "STICKIES_LOG")]
    pub log_file: Option<PathBuf>,

    /// Forget all notes and the theme before starting.
    #[arg(long)]
    pub reset: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["stickies"]).unwrap();
        assert_eq!(config.store, PathBuf::from("stickies.db"));
        assert!(!config.reset);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "stickies",
            "--store",
            "/tmp/board.db",
            "--log-file",
            "/tmp/stickies.log",
            "--reset",
        ])
        .unwrap();
        assert_eq!(config.store, PathBuf::from("/tmp/board.db"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/stickies.log")));
        assert!(config.reset);
    }
}
