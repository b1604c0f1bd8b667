mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Send an email to telegram users through a bot.
///
/// Reads one message from stdin, like `sendmail`.
#[derive(Debug, Parser)]
#[command(name = "sendmail-telegram", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Extract recipients from the To, Cc and Bcc headers, in addition to
    /// any given as arguments. Disable with `-t=false`.
    #[arg(
        short = 't',
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    extract_recipients: bool,

    /// Message subject. Overrides the Subject header.
    #[arg(short = 's', value_name = "SUBJECT")]
    subject: Option<String>,

    /// Message sender. Overrides the From header.
    #[arg(short = 'f', short_alias = 'r', value_name = "FROM")]
    from: Option<String>,

    /// Config file to use instead of searching the standard locations.
    #[arg(long, global = true, env = "SENDMAIL_TELEGRAM_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Recipient addresses.
    recipients: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print chats that recently messaged the bot, to fill in addr_mapping.
    Aid,
    /// Manage the bot token stored in the OS keychain.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Read a token from stdin and store it.
    Set,
    /// Remove the stored token.
    Delete,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (args, ignored) = commands::sanitize_args(std::env::args());
    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);
    for flag in &ignored {
        tracing::debug!(%flag, "ignoring unsupported sendmail flag");
    }

    match cli.command {
        Some(Command::Aid) => commands::aid(cli.config.as_deref()).await,
        Some(Command::Token { action }) => match action {
            TokenAction::Set => commands::token_set(),
            TokenAction::Delete => commands::token_delete(),
        },
        None => {
            let options = commands::SendOptions {
                extract_recipients: cli.extract_recipients,
                subject: cli.subject,
                from: cli.from,
                recipients: cli.recipients,
            };
            commands::sendmail(cli.config.as_deref(), &options).await
        }
    }
}
