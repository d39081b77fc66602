//! Social share links for opportunity pages.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::catalog::Opportunity;

const TWITTER_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Characters `encodeURIComponent` leaves as-is.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareIntent {
    pub label: &'static str,
    pub text: String,
    pub url: String,
}

impl ShareIntent {
    /// "Share on X" intent announcing an application to `opportunity`.
    pub fn applied_to(opportunity: &Opportunity) -> Self {
        let text = applied_share_text(&opportunity.name);
        let url = intent_url(&text);
        Self {
            label: "Share on X",
            text,
            url,
        }
    }
}

pub fn applied_share_text(name: &str) -> String {
    format!(
        "I'm delighted to share that I've applied to {name} to elevate my startup's trajectory, \
tap into tailored mentorship, and collaborate with fellow innovators.\n\n\
Can't wait to dive in and share updates as the journey unfolds!"
    )
}

fn intent_url(text: &str) -> String {
    let encoded = utf8_percent_encode(text, URI_COMPONENT);
    format!("{TWITTER_INTENT_URL}?text={encoded}")
}
