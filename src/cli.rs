use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use postkit::collection::{self, FixReporter};
use postkit::config::{ConfigLoader, PostkitConfig};
use postkit::report::{self, ReportGenerator, ReportPaths};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 配置文件路径（默认向上查找 postkit.toml）
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add auth inheritance, Content-Type headers and encoded JSON query params to a Postman collection
    Fix {
        /// Collection file to rewrite in place
        path: Option<PathBuf>,

        /// Report the fixes without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate an HTML report from Newman JSON results
    Report {
        /// Newman JSON results file
        #[arg(long, value_name = "PATH")]
        results: Option<PathBuf>,

        /// HTML report template
        #[arg(long, value_name = "PATH")]
        template: Option<PathBuf>,

        /// Output HTML file
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Fix { path, dry_run } => run_fix(&config, path, dry_run),
        Commands::Report {
            results,
            template,
            output,
        } => run_report(&config, results, template, output),
    }
}

fn run_fix(config: &PostkitConfig, path: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let path = config.collection_path(path);
    let reporter = FixReporter::new(dry_run);

    reporter.print_header(&path);
    let fix_report = collection::fix_file(&path, dry_run)
        .with_context(|| format!("Failed to fix collection {}", path.display()))?;
    reporter.print_requests(&fix_report);
    reporter.print_summary(&fix_report, &path);

    Ok(())
}

fn run_report(
    config: &PostkitConfig,
    results: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let paths = ReportPaths {
        results: config.results_path(results),
        template: config.template_path(template),
        output: config.output_path(output),
    };

    let generator = ReportGenerator::new(paths);
    let summary = generator
        .generate()
        .context("Error generating HTML report")?;
    report::print_summary(&summary);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fix_args() {
        let cli = Cli::parse_from(["postkit", "fix", "collection.json", "--dry-run"]);
        match cli.command {
            Commands::Fix { path, dry_run } => {
                assert_eq!(path, Some(PathBuf::from("collection.json")));
                assert!(dry_run);
            }
            _ => panic!("Expected fix command"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_report_args() {
        let cli = Cli::parse_from([
            "postkit",
            "report",
            "--results",
            "r.json",
            "--output",
            "out.html",
            "--config",
            "custom.toml",
        ]);
        match cli.command {
            Commands::Report {
                results,
                template,
                output,
            } => {
                assert_eq!(results, Some(PathBuf::from("r.json")));
                assert_eq!(template, None);
                assert_eq!(output, Some(PathBuf::from("out.html")));
            }
            _ => panic!("Expected report command"),
        }
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["postkit"]).is_err());
    }
}
