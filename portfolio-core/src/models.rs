use serde::{Deserialize, Serialize};

/// Where a record came from. Only used to vary rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub read_time: u32,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Canonical URL on the blog platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub has_next_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Seo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Long-form narrative, already collapsed to a single renderable string.
    pub case_study: String,
    pub category: String,
    pub featured: bool,
    pub published_at: String,
    pub updated_at: String,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

/// A rich-text field as stored by the CMS, in every format it offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RichText {
    /// HTML first, then markdown, then plain text. Empty strings count as absent.
    pub fn render(&self) -> String {
        self.preferred(true).unwrap_or_default()
    }

    /// Like [`render`](Self::render) but without the plain-text tier, and
    /// `None` when neither HTML nor markdown is present.
    pub fn render_markup(&self) -> Option<String> {
        self.preferred(false)
    }

    fn preferred(&self, with_text: bool) -> Option<String> {
        let text = if with_text { self.text.as_deref() } else { None };
        [self.html.as_deref(), self.markdown.as_deref(), text]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .map(ToOwned::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich(html: &str, markdown: &str, text: &str) -> RichText {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        RichText {
            raw: None,
            html: opt(html),
            markdown: opt(markdown),
            text: opt(text),
        }
    }

    #[test]
    fn render_prefers_html() {
        assert_eq!(rich("<p>a</p>", "a", "a").render(), "<p>a</p>");
    }

    #[test]
    fn render_falls_through_empty_formats() {
        assert_eq!(rich("", "*b*", "b").render(), "*b*");
        assert_eq!(rich("", "", "plain").render(), "plain");
        assert_eq!(rich("", "", "").render(), "");
        assert_eq!(RichText::default().render(), "");
    }

    #[test]
    fn render_markup_ignores_plain_text() {
        assert_eq!(rich("", "", "plain").render_markup(), None);
        assert_eq!(rich("", "md", "plain").render_markup().as_deref(), Some("md"));
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Fallback).unwrap(), "\"fallback\"");
    }
}
