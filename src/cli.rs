use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "hot list ingestion and sentiment scoring")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch the aggregator page and store it as a raw snapshot
    Ingest,
    /// Rebuild scored records from every stored snapshot
    Process,
    /// Write chart data modules for the dashboard
    Export {
        /// Output directory (defaults to html/data)
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Render the latest day's top headlines as an HTML digest
    Digest {
        /// Number of headlines (defaults to 20)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output file (defaults to html/digest.html)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Start the JSON API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::parse_from(["hotlist_pulse", "digest", "--limit", "5"]);
        assert_eq!(cli.command, Command::Digest { limit: Some(5), output: None });

        let cli = Cli::parse_from(["hotlist_pulse", "serve"]);
        assert_eq!(cli.command, Command::Serve { port: 3000 });

        let cli = Cli::parse_from(["hotlist_pulse", "export", "-o", "out"]);
        assert_eq!(cli.command, Command::Export { output_dir: Some("out".to_string()) });
    }
}
