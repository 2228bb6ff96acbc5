//! Command-line arguments and how they layer over the loaded configuration.

use clap::Parser;
use piiscan_core::{AppConfig, ConfigError, ConfigResult};
use std::path::PathBuf;

/// Default JSON report path when `--json` is given without a value.
pub const DEFAULT_JSON_OUTPUT: &str = "statistics.json";

#[derive(Parser, Debug)]
#[command(
    name = "piiscan",
    version,
    about = "Scan documents for personally identifiable information"
)]
pub struct Args {
    /// Scan a single file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Scan every supported file in a directory
    #[arg(short, long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Matching strategy: regex or keyword
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<String>,

    /// Write a JSON report (defaults to statistics.json)
    #[arg(
        short,
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_JSON_OUTPUT
    )]
    pub json: Option<PathBuf>,

    /// JSON or TOML file with custom patterns and keywords
    #[arg(short = 'p', long, value_name = "PATH")]
    pub pattern_config: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of files processed in parallel
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Suppress the console report
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the supported file extensions and exit
    #[arg(long)]
    pub list_formats: bool,
}

/// What to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    File(PathBuf),
    Directory(PathBuf),
}

impl Args {
    /// Resolve the file/directory pair into a single target.
    pub fn target(&self) -> ConfigResult<ScanTarget> {
        match (&self.file, &self.directory) {
            (Some(file), None) => Ok(ScanTarget::File(file.clone())),
            (None, Some(dir)) => Ok(ScanTarget::Directory(dir.clone())),
            (Some(_), Some(_)) => Err(ConfigError::InvalidInput(
                "--file and --directory cannot be used together".to_string(),
            )),
            (None, None) => Err(ConfigError::InvalidInput(
                "either --file or --directory is required".to_string(),
            )),
        }
    }

    /// Override configuration values with the flags that were given.
    pub fn apply_to(&self, config: &mut AppConfig) -> ConfigResult<()> {
        if let Some(strategy) = &self.strategy {
            config.scanning.strategy = strategy.parse()?;
        }
        if self.recursive {
            config.scanning.recursive = true;
        }
        if let Some(concurrency) = self.concurrency {
            config.scanning.concurrency = concurrency;
        }
        if let Some(path) = &self.pattern_config {
            config.scanning.pattern_file = Some(path.clone());
        }
        if let Some(path) = &self.json {
            config.output.json = Some(path.clone());
        }
        if self.quiet {
            config.output.console = false;
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiscan_core::StrategyKind;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("piiscan").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_json_default_value() {
        let args = parse(&["-d", "docs", "-j"]);
        assert_eq!(args.json, Some(PathBuf::from(DEFAULT_JSON_OUTPUT)));

        let args = parse(&["-d", "docs", "--json", "out.json"]);
        assert_eq!(args.json, Some(PathBuf::from("out.json")));

        assert_eq!(parse(&["-d", "docs"]).json, None);
    }

    #[test]
    fn test_target_resolution() {
        assert_eq!(
            parse(&["-f", "a.pdf"]).target().unwrap(),
            ScanTarget::File(PathBuf::from("a.pdf"))
        );
        assert_eq!(
            parse(&["--directory", "docs"]).target().unwrap(),
            ScanTarget::Directory(PathBuf::from("docs"))
        );
        assert!(matches!(
            parse(&["-f", "a.pdf", "-d", "docs"]).target(),
            Err(ConfigError::InvalidInput(_))
        ));
        assert!(matches!(parse(&[]).target(), Err(ConfigError::InvalidInput(_))));
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "-d", "docs", "-r", "-s", "KEYWORD", "-p", "custom.json", "--concurrency", "4", "-q",
        ]);
        let mut config = AppConfig::default();
        args.apply_to(&mut config).unwrap();

        assert_eq!(config.scanning.strategy, StrategyKind::Keyword);
        assert!(config.scanning.recursive);
        assert_eq!(config.scanning.concurrency, 4);
        assert_eq!(config.scanning.pattern_file, Some(PathBuf::from("custom.json")));
        assert!(!config.output.console);
    }

    #[test]
    fn test_unknown_strategy_is_config_error() {
        let args = parse(&["-d", "docs", "-s", "fuzzy"]);
        let err = args.apply_to(&mut AppConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy(_)));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let args = parse(&["-d", "docs", "--concurrency", "0"]);
        assert!(matches!(
            args.apply_to(&mut AppConfig::default()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
