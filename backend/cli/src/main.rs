mod inspect_cmd;
mod serve_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linebot")]
#[command(about = "LINE bot webhook receiver and tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Config file (defaults to ~/.linebot/linebot.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the X-LINE-Signature for a request body
    Sign {
        #[arg(long, env = "LINE_CHANNEL_SECRET", hide_env_values = true)]
        secret: String,

        /// Body file, or `-` for stdin
        file: PathBuf,
    },
    /// Verify and decode a captured webhook body, printing the events as JSON
    Parse {
        #[arg(long, env = "LINE_CHANNEL_SECRET", hide_env_values = true)]
        secret: String,

        #[arg(long)]
        signature: String,

        /// Body file, or `-` for stdin
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => serve_cmd::run(config, port).await?,
        Commands::Sign { secret, file } => {
            println!("{}", inspect_cmd::sign(&secret, &file)?);
        }
        Commands::Parse {
            secret,
            signature,
            file,
        } => {
            println!("{}", inspect_cmd::parse(&secret, &signature, &file)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from(["linebot", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { config, port } => {
                assert!(config.is_none());
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parse_requires_signature() {
        let result = Cli::try_parse_from(["linebot", "parse", "--secret", "s", "body.json"]);
        assert!(result.is_err());
    }
}
