use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

/// A fully rendered outbound email. Callers render both bodies themselves.
#[derive(Debug, Clone)]
pub struct Email {
    pub subject: String,
    pub recipient: String,
    pub text_body: String,
    pub html_body: String,
}

/// Outbound mail dispatch.
///
/// `send` must not block the caller on delivery: the request that triggered
/// the email has already produced its response by the time the transport
/// reports anything. Delivery failures go to the log, never to the client,
/// and a failed send is dropped after one attempt.
pub trait Mailer: Send + Sync {
    fn send(&self, email: Email);
}

/// SMTP-backed `Mailer` using lettre's async transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> anyhow::Result<Self> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("Invalid mail.from address '{}': {}", config.from, e))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, email: Email) {
        let Email {
            subject,
            recipient,
            text_body,
            html_body,
        } = email;

        let to: Mailbox = match recipient.parse() {
            Ok(mb) => mb,
            Err(e) => {
                tracing::error!("Invalid recipient address '{}': {}", recipient, e);
                return;
            }
        };

        let message = match Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text_body, html_body))
        {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Failed to build email for '{}': {}", recipient, e);
                return;
            }
        };

        // Each send is an independent task; no ordering between two emails
        // dispatched in quick succession.
        let transport = self.transport.clone();
        tokio::spawn(async move {
            if let Err(e) = transport.send(message).await {
                tracing::error!("Email delivery to '{}' failed: {}", recipient, e);
            }
        });
    }
}
