//! Recommendation-site scrape through a CORS relay.
//!
//! The page layout over there changes without notice, so the parser is a
//! tolerant tag scanner rather than a faithful DOM walk: card names come
//! from `/cards/` anchor links, grouped under the nearest preceding heading.
//! Anything unusable degrades to `Ok(None)` and the caller synthesizes
//! suggestions instead.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::NetworkConfig;
use crate::domain::SuggestionGroup;
use crate::error::{Error, Result};
use crate::ports::SuggestionSource;

const MAX_CARDS_PER_CATEGORY: usize = 8;
const DEFAULT_CATEGORY: &str = "Popular Cards";

/// The relay wraps the fetched document in a JSON envelope.
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: String,
}

pub struct EdhrecScraper {
    http: reqwest::Client,
    relay_url: String,
    edhrec_url: String,
}

impl EdhrecScraper {
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(network.user_agent.clone())
            .timeout(Duration::from_secs(network.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            relay_url: network.relay_url.clone(),
            edhrec_url: network.edhrec_url.trim_end_matches('/').to_string(),
        })
    }

    /// Commander name → page slug: lowercased, non-alphanumerics stripped,
    /// whitespace collapsed to hyphens.
    pub fn slug(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    async fn fetch_page(&self, slug: &str) -> Result<String> {
        let target = format!("{}/commanders/{}", self.edhrec_url, slug);
        let url = Url::parse_with_params(&self.relay_url, [("url", target.as_str())])?;
        debug!(%target, "fetching recommendation page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: response.url().to_string(),
            });
        }
        let envelope: RelayEnvelope = response.json().await?;
        Ok(envelope.contents)
    }
}

#[async_trait]
impl SuggestionSource for EdhrecScraper {
    async fn fetch(&self, commander_name: &str) -> Result<Option<Vec<SuggestionGroup>>> {
        let html = self.fetch_page(&Self::slug(commander_name)).await?;
        let groups = parse_suggestions(&html);
        Ok(if groups.is_empty() { None } else { Some(groups) })
    }
}

/// Extract suggestion groups from a recommendation page.
pub(crate) fn parse_suggestions(html: &str) -> Vec<SuggestionGroup> {
    let mut groups: Vec<SuggestionGroup> = Vec::new();
    let mut category: Option<String> = None;
    let mut cards: Vec<String> = Vec::new();

    let mut rest = html;
    while let Some(open) = rest.find('<') {
        rest = &rest[open..];

        let heading = read_tag(rest, "h2").or_else(|| read_tag(rest, "h3"));
        if let Some(element) = heading {
            flush(&mut groups, &mut category, &mut cards);
            let text = strip_tags(element.inner).trim().to_string();
            if !text.is_empty() {
                category = Some(text);
            }
            rest = element.after;
            continue;
        }

        if let Some((href, element)) = read_anchor(rest) {
            if href.contains("/cards/") {
                let name = strip_tags(element.inner).trim().to_string();
                if name.len() > 2
                    && cards.len() < MAX_CARDS_PER_CATEGORY
                    && !cards.contains(&name)
                {
                    cards.push(name);
                }
            }
            rest = element.after;
            continue;
        }

        rest = &rest[1..];
    }
    flush(&mut groups, &mut category, &mut cards);
    groups
}

fn flush(groups: &mut Vec<SuggestionGroup>, category: &mut Option<String>, cards: &mut Vec<String>) {
    if cards.is_empty() {
        return;
    }
    let name = category
        .take()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    groups.push(SuggestionGroup::new(name, std::mem::take(cards)));
}

struct Element<'a> {
    inner: &'a str,
    after: &'a str,
}

/// Read a `<name ...>inner</name>` element at the start of `s`.
fn read_tag<'a>(s: &'a str, name: &str) -> Option<Element<'a>> {
    let after_bracket = s.strip_prefix('<')?;
    let after_name = after_bracket.strip_prefix(name)?;
    if !after_name.starts_with([' ', '>', '\t', '\n']) {
        return None;
    }
    let open_end = s.find('>')?;
    let body = &s[open_end + 1..];
    let close = format!("</{name}>");
    let close_pos = body.find(&close)?;
    Some(Element {
        inner: &body[..close_pos],
        after: &body[close_pos + close.len()..],
    })
}

fn read_anchor(s: &str) -> Option<(String, Element<'_>)> {
    let element = read_tag(s, "a")?;
    let open_end = s.find('>')?;
    let href = attribute(&s[..open_end], "href").unwrap_or_default();
    Some((href, element))
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let marker = format!("{name}=");
    let start = tag.find(&marker)? + marker.len();
    let rest = &tag[start..];
    let mut chars = rest.chars();
    match chars.next()? {
        quote @ ('"' | '\'') => {
            let value = &rest[1..];
            Some(value[..value.find(quote)?].to_string())
        }
        _ => {
            let end = rest.find([' ', '>']).unwrap_or(rest.len());
            Some(rest[..end].to_string())
        }
    }
}

fn strip_tags(s: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_punctuation_and_hyphenates() {
        assert_eq!(
            EdhrecScraper::slug("Atraxa, Praetors' Voice"),
            "atraxa-praetors-voice"
        );
        assert_eq!(EdhrecScraper::slug("Krenko, Mob Boss"), "krenko-mob-boss");
    }

    #[test]
    fn parses_cards_grouped_by_heading() {
        let html = r#"
            <h2>Ramp</h2>
            <a href="/cards/sol-ring">Sol Ring</a>
            <a href="/cards/cultivate">Cultivate</a>
            <h3>Removal</h3>
            <a href="/cards/beast-within"><span>Beast Within</span></a>
        "#;
        let groups = parse_suggestions(html);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Ramp");
        assert_eq!(groups[0].cards, vec!["Sol Ring", "Cultivate"]);
        assert_eq!(groups[1].category, "Removal");
        assert_eq!(groups[1].cards, vec!["Beast Within"]);
    }

    #[test]
    fn cards_before_any_heading_get_default_category() {
        let html = r#"<a href="/cards/sol-ring">Sol Ring</a>"#;
        let groups = parse_suggestions(html);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Popular Cards");
    }

    #[test]
    fn ignores_non_card_links_and_short_names() {
        let html = r#"
            <a href="/commanders/other">Other Page</a>
            <a href="/cards/x">xy</a>
        "#;
        assert!(parse_suggestions(html).is_empty());
    }

    #[test]
    fn deduplicates_and_caps_cards_per_category() {
        let mut html = String::from("<h2>Bulk</h2>");
        for i in 0..12 {
            html.push_str(&format!(r#"<a href="/cards/c{i}">Card Number {i}</a>"#));
        }
        html.push_str(r#"<a href="/cards/c0">Card Number 0</a>"#);
        let groups = parse_suggestions(&html);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].cards.len(), 8);
    }

    #[test]
    fn empty_page_parses_to_nothing() {
        assert!(parse_suggestions("<html><body>nope</body></html>").is_empty());
    }
}
