use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "studypulse")]
#[command(about = "StudyPulse - study and social platform client", long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to the StudyPulse config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding config and environment
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory holding storage.json
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from([
            "studypulse",
            "--base-url",
            "http://localhost:8000/api",
            "--storage-dir",
            "/tmp/sp",
            "--ephemeral",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/sp")));
        assert!(cli.ephemeral);
        assert!(cli.config.is_none());
    }
}
