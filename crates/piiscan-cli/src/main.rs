//! piiscan - scan documents for personally identifiable information.
//!
//! Usage:
//!     piiscan --directory ./documents --recursive --json report.json
//!     piiscan --file contract.docx --strategy keyword

mod args;

use anyhow::Context;
use args::{Args, ScanTarget};
use clap::Parser;
use piiscan_core::AppConfig;
use piiscan_extract::ReaderRegistry;
use piiscan_scanner::{ConsoleExporter, JsonExporter, ResultHandler, ScanOrchestrator};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "info,piiscan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    // A bad file/directory combination fails before any config file is read.
    let target = if args.list_formats {
        None
    } else {
        Some(args.target().context("invalid command-line options")?)
    };

    let mut config =
        AppConfig::load_with_env(args.config.as_deref()).context("failed to load configuration")?;
    args.apply_to(&mut config).context("invalid command-line options")?;

    let Some(target) = target else {
        let registry = ReaderRegistry::with_defaults(config.limits);
        for extension in registry.supported_extensions() {
            println!("{extension}");
        }
        return Ok(());
    };

    let mut orchestrator =
        ScanOrchestrator::from_config(&config).context("failed to prepare scanner")?;

    let mut handler = ResultHandler::new();
    if config.output.console {
        handler.register(Box::new(ConsoleExporter::stdout()));
    }
    if let Some(path) = &config.output.json {
        handler.register(Box::new(JsonExporter::new(path)));
    }

    let (root, recursive) = match target {
        ScanTarget::File(path) => (path, false),
        ScanTarget::Directory(path) => (path, config.scanning.recursive),
    };

    let summary = orchestrator
        .scan(&root, recursive, &mut handler)
        .await
        .context("scan aborted")?;

    if summary.root_missing {
        eprintln!("warning: {} does not exist", root.display());
    }
    if !summary.failures.is_empty() {
        eprintln!(
            "warning: {} file(s) could not be read (run with --verbose for details)",
            summary.failures.len()
        );
    }
    if handler.failures() > 0 {
        eprintln!("warning: {} report write(s) failed", handler.failures());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiscan_core::ConfigError;
    use tempfile::TempDir;

    fn broken_config(dir: &TempDir) -> String {
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        path.display().to_string()
    }

    #[tokio::test]
    async fn test_missing_target_rejected_before_config_load() {
        let tmp = TempDir::new().unwrap();
        let args = Args::try_parse_from(["piiscan", "--config", &broken_config(&tmp)]).unwrap();

        let err = run(args).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_list_formats_still_reads_config() {
        let tmp = TempDir::new().unwrap();
        let args =
            Args::try_parse_from(["piiscan", "--list-formats", "--config", &broken_config(&tmp)])
                .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }
}
