use askama::Template;
use enrol_core::EmailMessage;

pub const CONFIRMATION_EMAIL_SUBJECT: &str = "Confirm your email";

/// Message sent after sign-up, rendered as HTML with a plain-text alternative.
pub struct ConfirmationEmail<'a> {
    pub name: &'a str,
    pub link: &'a str,
    pub validity_minutes: i64,
}

#[derive(Template)]
#[template(path = "confirmation_email.html")]
struct HtmlBody<'a> {
    name: &'a str,
    link: &'a str,
    validity_minutes: i64,
}

#[derive(Template)]
#[template(path = "confirmation_email.txt")]
struct TextBody<'a> {
    name: &'a str,
    link: &'a str,
    validity_minutes: i64,
}

impl ConfirmationEmail<'_> {
    pub fn render(&self) -> Result<EmailMessage, askama::Error> {
        let html_body = HtmlBody {
            name: self.name,
            link: self.link,
            validity_minutes: self.validity_minutes,
        }
        .render()?;
        let text_body = TextBody {
            name: self.name,
            link: self.link,
            validity_minutes: self.validity_minutes,
        }
        .render()?;

        Ok(EmailMessage::new(
            CONFIRMATION_EMAIL_SUBJECT,
            html_body,
            text_body,
        ))
    }
}

/// `<base>/confirm?token=<token>`, tolerating a trailing slash on `base`.
pub fn confirmation_link(base: &str, token: &str) -> String {
    format!("{}/confirm?token={}", base.trim_end_matches('/'), token)
}
