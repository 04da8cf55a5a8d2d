mod aws;
mod bulk;
mod delete;
mod reader;
mod receive;
mod send;
mod visibility;

use clap::{Args, Parser, Subcommand};

#[tokio::main]
pub async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = cli.run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(name = "sqsbulk")]
#[command(about = "send, receive, delete and re-time AWS SQS messages in bulk", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings shared by every command.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Talk to LocalStack with static test credentials
    #[arg(long, global = true)]
    local: bool,

    /// Override the SQS endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// AWS region (defaults to the environment/profile, or us-east-1)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Named AWS profile to load credentials from
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Queue URL or queue name to operate on
    #[arg(long, short, global = true)]
    queue: Option<String>,

    /// Log batch progress
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List all queue URLs
    List,
    /// Send every non-empty input line as a message body
    Send(send::SendArgs),
    /// Receive up to COUNT messages and print them as JSON lines
    Receive(receive::ReceiveArgs),
    /// Delete the messages whose receipt handles are read from input
    Delete(delete::DeleteArgs),
    /// Change the visibility timeout of the messages read from input
    Visibility(visibility::VisibilityArgs),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let queue = aws::connect(&self.global).await;
        let verbose = self.global.verbose;

        match self.command {
            Commands::List => {
                for url in queue.list().await? {
                    println!("{}", url);
                }
            }
            Commands::Send(args) => send::run(&queue, args, verbose).await?,
            Commands::Receive(args) => receive::run(&queue, args, verbose).await?,
            Commands::Delete(args) => delete::run(&queue, args, verbose).await?,
            Commands::Visibility(args) => visibility::run(&queue, args, verbose).await?,
        };

        Ok(())
    }
}
