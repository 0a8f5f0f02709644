/// Outgoing message with an HTML part and a plain-text alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl EmailMessage {
    pub fn new(
        subject: impl Into<String>,
        html_body: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            html_body: html_body.into(),
            text_body: text_body.into(),
        }
    }
}
