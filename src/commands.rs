use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;

use sendmail_telegram::config::{self, discover_config, load_config};
use sendmail_telegram::delivery::Sendmail;
use sendmail_telegram::message::{MailAddress, MailMessage};
use sendmail_telegram::platform::TelegramSession;

/// Headers scanned for recipients when `-t` is in effect.
const RECIPIENT_HEADERS: [&str; 3] = ["To", "Cc", "Bcc"];

/// Flags the CLI understands and whether each takes a separate value.
const KNOWN_FLAGS: &[(&str, bool)] = &[
    ("-t", false),
    ("-s", true),
    ("-f", true),
    ("-r", true),
    ("-v", false),
    ("--verbose", false),
    ("--config", true),
    ("-h", false),
    ("--help", false),
    ("-V", false),
    ("--version", false),
];

/// Drop sendmail flags we do not implement (`-i`, `-oi`, `-odb`, ...) so
/// that callers written for sendmail keep working.
///
/// Returns the kept arguments and the dropped flags.
pub fn sanitize_args<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    let mut kept: Vec<String> = iter.next().into_iter().collect();
    let mut ignored = Vec::new();
    let mut positional_only = false;

    while let Some(arg) = iter.next() {
        if positional_only || !arg.starts_with('-') || arg == "-" {
            kept.push(arg);
            continue;
        }
        if arg == "--" {
            positional_only = true;
            kept.push(arg);
            continue;
        }
        match flag_takes_value(&arg) {
            Some(true) => {
                kept.push(arg);
                if let Some(value) = iter.next() {
                    kept.push(value);
                }
            }
            Some(false) => kept.push(arg),
            None => ignored.push(arg),
        }
    }

    (kept, ignored)
}

/// `Some(takes_value)` for a recognised flag, `None` otherwise.
fn flag_takes_value(arg: &str) -> Option<bool> {
    if let Some((_, takes_value)) = KNOWN_FLAGS.iter().find(|(flag, _)| *flag == arg) {
        return Some(*takes_value);
    }
    if arg.starts_with("-t=") || arg.starts_with("--config=") {
        return Some(false);
    }
    // short value flags with the value attached: -sSubject, -fuser@host
    if ["-s", "-f", "-r"].iter().any(|f| arg.starts_with(f)) && arg.len() > 2 {
        return Some(false);
    }
    None
}

pub struct SendOptions {
    pub extract_recipients: bool,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub recipients: Vec<String>,
}

/// Apply the `-s` and `-f` header overrides.
fn apply_overrides(message: &mut MailMessage, options: &SendOptions) {
    if let Some(subject) = options.subject.as_deref().filter(|s| !s.is_empty()) {
        message.set_header("Subject", subject);
    }
    if let Some(from) = options.from.as_deref().filter(|s| !s.is_empty()) {
        message.set_header("From", from);
    }
}

/// Command-line recipients followed by header recipients. Anything that
/// does not parse is skipped with a warning.
fn collect_recipients(message: &MailMessage, options: &SendOptions) -> Vec<MailAddress> {
    let mut recipients = Vec::new();
    for arg in &options.recipients {
        match arg.parse::<MailAddress>() {
            Ok(address) => recipients.push(address),
            Err(e) => tracing::warn!("{e}, ignoring"),
        }
    }

    if options.extract_recipients {
        for header in RECIPIENT_HEADERS {
            match message.address_list(header) {
                Ok(addresses) => recipients.extend(addresses),
                Err(e) => tracing::warn!(header, "could not parse address header, ignoring: {e}"),
            }
        }
    }

    recipients
}

async fn connect(config_path: Option<&Path>) -> anyhow::Result<Sendmail<TelegramSession>> {
    let (path, config) = match config_path {
        Some(path) => (path.to_path_buf(), load_config(path)?),
        None => discover_config()?,
    };
    tracing::debug!(path = %path.display(), "using config");

    let token = config::resolve_token(&config)?;
    let session = TelegramSession::new(&token);
    Sendmail::connect(config, session)
        .await
        .context("could not connect to Telegram")
}

pub async fn sendmail(config_path: Option<&Path>, options: &SendOptions) -> anyhow::Result<()> {
    let mailer = connect(config_path).await?;

    let mut raw = Vec::new();
    std::io::stdin()
        .read_to_end(&mut raw)
        .context("error reading message from stdin")?;
    let mut message = MailMessage::parse(&raw)?;
    apply_overrides(&mut message, options);

    let recipients = collect_recipients(&message, options);
    let report = mailer.sendmail(&recipients, &message).await?;

    if !report.is_success() {
        let failed: Vec<String> = report
            .failures()
            .map(|f| f.destination.to_string())
            .collect();
        anyhow::bail!(
            "{} of {} deliveries failed: {}",
            report.failure_count(),
            report.results.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

pub async fn aid(config_path: Option<&Path>) -> anyhow::Result<()> {
    let mailer = connect(config_path).await?;
    let chats = mailer.recent_chats().await?;

    if chats.is_empty() {
        println!("No updates found. Send a message to your bot first.");
    }
    for chat in &chats {
        println!("{chat}");
    }
    Ok(())
}

pub fn token_set() -> anyhow::Result<()> {
    let mut token = String::new();
    std::io::stdin()
        .read_line(&mut token)
        .context("error reading token from stdin")?;
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("no token given on stdin");
    }
    config::store_token(token)?;
    eprintln!("Bot token stored in the OS keychain.");
    Ok(())
}

pub fn token_delete() -> anyhow::Result<()> {
    config::delete_token()?;
    eprintln!("Bot token removed from the OS keychain.");
    Ok(())
}
