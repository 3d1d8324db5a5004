use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use relay_testing::test_account::{self, FakeTestAccountServer};
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::TestAccount {
            host,
            port,
            smtp_host,
            smtp_port,
            web,
        } => {
            let server = FakeTestAccountServer::new(smtp_host, smtp_port, web);
            test_account::start_server(host, port, server).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the test account api testing server
    TestAccount {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        /// SMTP host handed out with every account, e.g. a local smtp4dev
        #[arg(long, default_value = "127.0.0.1")]
        smtp_host: String,
        #[arg(long, default_value = "2525")]
        smtp_port: u16,
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        web: Url,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
