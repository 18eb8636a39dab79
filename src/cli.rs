use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_FILE;

/// Freehand sketching canvas with stamps, undo/redo and PNG export.
#[derive(Parser, Debug)]
#[command(name = "sketchpad", version, about = "Freehand sketching canvas with PNG export")]
pub struct Args {
    /// JSON config file. Missing fields fall back to their defaults.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Path to read the config from
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_to_working_directory_file() {
        let args = Args::try_parse_from(["sketchpad"]).unwrap();
        assert_eq!(args.config_path(), PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_config_flag_sets_path() {
        let args = Args::try_parse_from(["sketchpad", "--config", "mine.json"]).unwrap();
        assert_eq!(args.config_path(), PathBuf::from("mine.json"));

        let args = Args::try_parse_from(["sketchpad", "-c", "short.json"]).unwrap();
        assert_eq!(args.config_path(), PathBuf::from("short.json"));
    }

    #[test]
    fn test_help_is_not_a_config_path() {
        let err = Args::try_parse_from(["sketchpad", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_bare_positional_is_rejected() {
        assert!(Args::try_parse_from(["sketchpad", "mine.json"]).is_err());
    }
}
