use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "deadrepo-doctor",
    about = "Diagnose a GitHub repository's dependency health",
    version
)]
pub struct Cli {
    /// GitHub repository URL [default: the last submitted URL]
    pub url: Option<String>,

    /// Backend base URL (overrides `backend_url` from the config file)
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// Config file [default: ./.deadrepo/config.toml, fallback ~/.config/deadrepo/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Only print the outdated package count, not the package table
    #[arg(long)]
    pub collapse: bool,

    /// Check that the backend is reachable and exit
    #[arg(long)]
    pub check: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["deadrepo-doctor"]).unwrap();
        assert!(cli.url.is_none());
        assert!(matches!(cli.report, ReportFormat::Terminal));
        assert!(!cli.collapse);
    }

    #[test]
    fn test_url_and_flags() {
        let cli = Cli::try_parse_from([
            "deadrepo-doctor",
            "https://github.com/foo/bar",
            "--backend",
            "http://localhost:9000",
            "--report",
            "json",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://github.com/foo/bar"));
        assert_eq!(cli.backend.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.report, ReportFormat::Json));
        assert!(cli.quiet);
    }
}
