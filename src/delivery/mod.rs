use crate::config::{Config, Destination};
use crate::discovery;
use crate::message::{HeaderMap, MailAddress, MailMessage};
use crate::platform::{BotIdentity, ChatSummary, PlatformSession};
use crate::render::render_message;
use crate::resolve::resolve;
use crate::SendmailError;

/// Send outcome for one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryResult {
    pub destination: Destination,
    /// Every input address that resolved to `destination`, in input order.
    pub recipients: Vec<String>,
    pub success: bool,
    pub error: Option<String>,
}

/// Aggregate outcome of one `sendmail` call, one entry per distinct
/// destination in first-resolved order.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub results: Vec<DeliveryResult>,
}

impl DeliveryReport {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeliveryResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Delivers mail to chats: renders once, resolves every recipient, and
/// sends at most once per destination.
pub struct Sendmail<S> {
    config: Config,
    session: S,
}

impl<S: PlatformSession> Sendmail<S> {
    /// Verify the session's credential and take ownership of it.
    pub async fn connect(config: Config, session: S) -> crate::Result<Self> {
        let identity: BotIdentity = session.verify().await?;
        tracing::debug!(
            bot_id = identity.id,
            bot_username = identity.username.as_deref().unwrap_or(""),
            "verified bot credential"
        );
        Ok(Self { config, session })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Render `message` and deliver it to the chat of every recipient.
    ///
    /// Rendering and validation failures abort before anything is sent.
    /// Individual send failures do not stop the remaining sends; they are
    /// logged and reported in the returned [`DeliveryReport`].
    pub async fn sendmail(
        &self,
        recipients: &[MailAddress],
        message: &MailMessage,
    ) -> crate::Result<DeliveryReport> {
        let headers = HeaderMap::from_message(message);
        let rendered = render_message(&headers, &self.config.format, self.config.parse_mode)?;

        if recipients.is_empty() {
            return Err(SendmailError::NoRecipients);
        }

        let mut report = DeliveryReport::default();
        for recipient in recipients {
            let destination = resolve(recipient, &self.config);
            if let Some(existing) = report
                .results
                .iter_mut()
                .find(|r| &r.destination == destination)
            {
                tracing::debug!(
                    recipient = %recipient.address,
                    %destination,
                    "destination already handled"
                );
                existing.recipients.push(recipient.address.clone());
                continue;
            }

            let outcome = self.session.send(destination, &rendered).await;
            let error = match outcome {
                Ok(()) => {
                    tracing::info!(recipient = %recipient.address, %destination, "delivered");
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        recipient = %recipient.address,
                        %destination,
                        error = %e,
                        "delivery failed"
                    );
                    Some(e.to_string())
                }
            };
            report.results.push(DeliveryResult {
                destination: destination.clone(),
                recipients: vec![recipient.address.clone()],
                success: error.is_none(),
                error,
            });
        }

        Ok(report)
    }

    /// Chats that recently messaged the bot; see [`discovery::list_recent_chats`].
    pub async fn recent_chats(&self) -> crate::Result<Vec<ChatSummary>> {
        discovery::list_recent_chats(&self.session).await
    }
}
