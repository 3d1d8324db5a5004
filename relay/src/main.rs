use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use relay::{
    commands::{email::EmailCommand, serve::serve},
    environment::ConfigProvider,
};
use relay_utils::relay_version;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = match Cli::parse().command {
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        command => command,
    };

    init_tracing();

    let config = relay_config::load().context("Failed to load config")?;

    match command {
        Command::Serve => serve(config).await,
        Command::Email { command } => command.invoke(config).await,
        Command::CheckConfig { verbose } => {
            ConfigProvider::new(&config)?;
            if verbose {
                println!("{config:#?}");
            }
            println!("Config is valid");
            Ok(())
        }
        Command::Completion { .. } => Ok(()),
    }
}

#[derive(Debug, Parser)]
#[command(version = relay_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Accept contact form submissions over http and relay them by email
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    /// Send test emails through the configured transport
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Load the configuration and report errors
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// Logs go to stderr, filtered by `RUST_LOG` (`info` if unset).
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(pretty_logs)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn email_test_recipient() {
        let cli = Cli::try_parse_from(["relay", "email", "test", "Max <max@example.de>"]).unwrap();

        let Command::Email {
            command: EmailCommand::Test { recipient },
        } = cli.command
        else {
            panic!("expected the email test command");
        };
        assert_eq!(recipient.email(), "max@example.de");
        assert_eq!(recipient.name(), Some("Max"));
    }

    #[test]
    fn email_test_invalid_recipient() {
        assert!(Cli::try_parse_from(["relay", "email", "test", "not an address"]).is_err());
    }
}
