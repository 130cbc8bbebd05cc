//! Share-panel content: the message copy and per-service share URLs.

use anyhow::{Context, Result};
use url::Url;

use crate::model::ComfortVerdict;

/// Public URL of the app, advertised in share messages.
pub const APP_URL: &str = "https://sleep-tonight-a6a96.web.app/";

/// The copy shown in a share, derived from a known verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub subject: String,
    pub body: String,
}

impl ShareMessage {
    /// `None` when the verdict is unknown; there is nothing to brag about.
    pub fn for_verdict(verdict: &ComfortVerdict) -> Option<Self> {
        let average = verdict.average_night_temp_c?;

        let subject = if verdict.comfortable {
            "I'm going to sleep tonight!".to_string()
        } else {
            "I'm going to not sleep tonight!".to_string()
        };

        let body = format!(
            "I'm not sleeping as its {average}\u{b0}C where I live tonight. \
             Check if you're going to be able to sleep at {APP_URL}"
        );

        Some(Self { subject, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareService {
    Email,
    Facebook,
    LinkedIn,
    Reddit,
    Twitter,
    WhatsApp,
}

impl ShareService {
    pub fn label(&self) -> &'static str {
        match self {
            ShareService::Email => "Email",
            ShareService::Facebook => "Facebook",
            ShareService::LinkedIn => "LinkedIn",
            ShareService::Reddit => "Reddit",
            ShareService::Twitter => "Twitter",
            ShareService::WhatsApp => "WhatsApp",
        }
    }

    pub const fn all() -> &'static [ShareService] {
        &[
            ShareService::Email,
            ShareService::Facebook,
            ShareService::LinkedIn,
            ShareService::Reddit,
            ShareService::Twitter,
            ShareService::WhatsApp,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub service: ShareService,
    pub url: Url,
}

/// Build the share intent URL for every supported service. Percent-encoding
/// is delegated to the `url` crate.
pub fn share_links(message: &ShareMessage) -> Result<Vec<ShareLink>> {
    ShareService::all()
        .iter()
        .map(|&service| {
            let url = share_url(service, message)
                .with_context(|| format!("Failed to build {} share link", service.label()))?;
            Ok(ShareLink { service, url })
        })
        .collect()
}

fn share_url(service: ShareService, message: &ShareMessage) -> Result<Url, url::ParseError> {
    let mut url = match service {
        ShareService::Email => Url::parse("mailto:")?,
        ShareService::Facebook => Url::parse("https://www.facebook.com/sharer/sharer.php")?,
        ShareService::LinkedIn => Url::parse("https://www.linkedin.com/shareArticle")?,
        ShareService::Reddit => Url::parse("https://www.reddit.com/submit")?,
        ShareService::Twitter => Url::parse("https://twitter.com/intent/tweet")?,
        ShareService::WhatsApp => Url::parse("https://api.whatsapp.com/send")?,
    };

    {
        let mut query = url.query_pairs_mut();
        match service {
            ShareService::Email => {
                query.append_pair("subject", &message.subject);
                query.append_pair("body", &message.body);
            }
            ShareService::Facebook => {
                query.append_pair("u", APP_URL);
                query.append_pair("quote", &message.body);
            }
            ShareService::LinkedIn => {
                query.append_pair("mini", "true");
                query.append_pair("url", APP_URL);
                query.append_pair("title", &message.subject);
                query.append_pair("summary", &message.body);
            }
            ShareService::Reddit => {
                query.append_pair("url", APP_URL);
                query.append_pair("title", &message.subject);
            }
            ShareService::Twitter => {
                query.append_pair("url", APP_URL);
                query.append_pair("text", &message.subject);
            }
            ShareService::WhatsApp => {
                query.append_pair("text", &format!("{} {}", message.subject, APP_URL));
            }
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(avg: i32) -> ComfortVerdict {
        ComfortVerdict { average_night_temp_c: Some(avg), comfortable: avg < 20 }
    }

    #[test]
    fn comfortable_verdict_gets_the_positive_subject() {
        let message = ShareMessage::for_verdict(&verdict(12)).unwrap();

        assert_eq!(message.subject, "I'm going to sleep tonight!");
        assert!(message.body.contains("12\u{b0}C"));
        assert!(message.body.contains(APP_URL));
    }

    #[test]
    fn uncomfortable_verdict_gets_the_negative_subject() {
        let message = ShareMessage::for_verdict(&verdict(26)).unwrap();

        assert_eq!(message.subject, "I'm going to not sleep tonight!");
    }

    #[test]
    fn unknown_verdict_has_no_share_message() {
        assert_eq!(ShareMessage::for_verdict(&ComfortVerdict::unknown()), None);
    }

    #[test]
    fn builds_one_link_per_service() {
        let message = ShareMessage::for_verdict(&verdict(26)).unwrap();

        let links = share_links(&message).unwrap();

        assert_eq!(links.len(), ShareService::all().len());
    }

    #[test]
    fn share_links_are_percent_encoded() {
        let message = ShareMessage::for_verdict(&verdict(26)).unwrap();

        let links = share_links(&message).unwrap();
        let twitter = links.iter().find(|l| l.service == ShareService::Twitter).unwrap();

        let s = twitter.url.as_str();
        assert!(s.starts_with("https://twitter.com/intent/tweet?"));
        // Apostrophes and spaces from the copy must not appear raw.
        assert!(!s.contains(' '));
        assert!(s.contains("I%27m"));
    }

    #[test]
    fn whatsapp_text_carries_the_app_url() {
        let message = ShareMessage::for_verdict(&verdict(12)).unwrap();

        let links = share_links(&message).unwrap();
        let whatsapp = links.iter().find(|l| l.service == ShareService::WhatsApp).unwrap();

        let text = whatsapp
            .url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        assert!(text.starts_with("I'm going to sleep tonight!"));
        assert!(text.ends_with(APP_URL));
    }

    #[test]
    fn email_link_uses_the_mailto_scheme() {
        let message = ShareMessage::for_verdict(&verdict(12)).unwrap();

        let links = share_links(&message).unwrap();
        let email = links.iter().find(|l| l.service == ShareService::Email).unwrap();

        assert_eq!(email.url.scheme(), "mailto");
        assert!(email.url.query().unwrap_or_default().contains("subject="));
    }
}
