use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use grabbit::analyzer::{
    BatchAnalyzer, ConfigBuilder, DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT,
};
use grabbit::clients::{
    discogs::{DEFAULT_BASE_URL, DEFAULT_PER_PAGE},
    entities::LookupRequest,
    errors::Result,
};
use log::{LevelFilter, info};
use tokio::io::AsyncReadExt;

#[derive(Parser)]
#[command(name = "grabbit")]
#[command(version, about = "Look up track versions, formats and videos on Discogs", long_about = None)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON array of {"track", "artist"} objects
    Analyze {
        /// Input file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Discogs personal access token
        #[arg(long, env = "DISCOGS_TOKEN", hide_env_values = true)]
        token: String,
        /// Seconds to wait between retries of a failed search
        #[arg(long, default_value_t = DEFAULT_RATE_LIMIT.as_secs())]
        rate_limit: u64,
        /// Attempts per search before giving up
        #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
        max_retries: u32,
        /// Releases fetched per search
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Analyze {
                input,
                output,
                token,
                rate_limit,
                max_retries,
                per_page,
                base_url,
            } => {
                let config = ConfigBuilder::new()
                    .token(token)
                    .rate_limit(Duration::from_secs(rate_limit))
                    .max_retries(max_retries)
                    .per_page(per_page)
                    .base_url(base_url)
                    .build()?;
                analyze_tracks(config, input, output).await
            }
        }
    }
}

async fn read_requests(input: Option<PathBuf>) -> Result<Vec<LookupRequest>> {
    let raw = match input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

async fn analyze_tracks(
    config: grabbit::analyzer::Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let requests = read_requests(input).await?;
    info!("Loaded {} lookup request(s)", requests.len());

    let analyzer = BatchAnalyzer::from_config(config)?;
    let reports = analyzer.analyze(&requests).await?;
    let rendered = serde_json::to_string_pretty(&reports)?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            info!("Wrote {} report(s) to {path:?}", reports.len());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["grabbit", "analyze", "--token", "abc"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Info);
        let Commands::Analyze {
            input,
            token,
            rate_limit,
            max_retries,
            per_page,
            base_url,
            ..
        } = cli.command;
        assert!(input.is_none());
        assert_eq!(token, "abc");
        assert_eq!(rate_limit, 60);
        assert_eq!(max_retries, 3);
        assert_eq!(per_page, 50);
        assert_eq!(base_url, "https://api.discogs.com");
    }

    #[test]
    fn test_parse_log_level() {
        let cli = Cli::try_parse_from([
            "grabbit",
            "--log-level",
            "debug",
            "analyze",
            "--token",
            "abc",
            "--max-retries",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[tokio::test]
    async fn test_read_requests_from_file() {
        let path = std::env::temp_dir().join(format!("grabbit_input_{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[{"track": "Fancy", "artist": "Reba McEntire"}, {"track": "Shape of You", "artist": "Ed Sheeran"}]"#,
        )
        .await
        .unwrap();

        let requests = read_requests(Some(path.clone())).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(
            requests,
            vec![
                LookupRequest::new("Fancy", "Reba McEntire"),
                LookupRequest::new("Shape of You", "Ed Sheeran"),
            ]
        );
    }
}
