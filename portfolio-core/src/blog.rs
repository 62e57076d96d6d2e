use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::BlogConfig;
use crate::error::FetchError;
use crate::fallback;
use crate::graphql::GraphqlClient;
use crate::models::{Author, Post, PostPage, Publication, RichText, Source};
use crate::policy::{self, Operation};

const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_READ_TIME: u32 = 5;

macro_rules! post_fields {
    () => {
        "id title slug subtitle brief
         content { markdown html }
         publishedAt readTimeInMinutes
         tags { id name slug }
         coverImage { url }
         author { name username profilePicture }
         url"
    };
}

pub const GET_PUBLICATION_POSTS: &str = concat!(
    "query GetPublicationPosts($host: String!, $first: Int = 10, $after: String) {
       publication(host: $host) {
         id title url
         posts(first: $first, after: $after) {
           edges { node { ",
    post_fields!(),
    " } }
           pageInfo { hasNextPage endCursor }
         }
       }
     }"
);

pub const GET_POST_BY_SLUG: &str = concat!(
    "query GetPostBySlug($host: String!, $slug: String!) {
       publication(host: $host) {
         post(slug: $slug) { ",
    post_fields!(),
    " }
       }
     }"
);

pub const GET_PUBLICATION_INFO: &str = "query GetPublicationInfo($host: String!) {
  publication(host: $host) { id title about { text } url }
}";

#[derive(Debug, Deserialize)]
struct PublicationData {
    publication: Option<RawPublication>,
}

#[derive(Debug, Deserialize)]
struct RawPublication {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    about: Option<RawAbout>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    posts: Option<RawConnection>,
    #[serde(default)]
    post: Option<RawPost>,
}

#[derive(Debug, Deserialize)]
struct RawAbout {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnection {
    #[serde(default)]
    edges: Vec<RawEdge>,
    page_info: Option<RawPageInfo>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    node: RawPost,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageInfo {
    #[serde(default)]
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    id: String,
    slug: String,
    #[serde(default)]
    title: Option<String>,
    subtitle: Option<String>,
    brief: Option<String>,
    content: Option<RawContent>,
    published_at: Option<String>,
    read_time_in_minutes: Option<u32>,
    tags: Option<Vec<RawTag>>,
    cover_image: Option<RawImage>,
    author: Option<RawAuthor>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    markdown: Option<String>,
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuthor {
    name: String,
    username: String,
    profile_picture: Option<String>,
}

impl RawPost {
    fn into_post(self) -> Post {
        let tags: Vec<String> = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        let category = tags
            .first()
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned());
        let excerpt = [self.brief, self.subtitle]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default();
        let content = self
            .content
            .map(|content| RichText {
                raw: None,
                html: content.html,
                markdown: content.markdown,
                text: None,
            })
            .unwrap_or_default()
            .render();
        let date = match self.published_at.as_deref() {
            Some(timestamp) => calendar_date(timestamp),
            None => Utc::now().date_naive().to_string(),
        };

        Post {
            id: self.id,
            slug: self.slug,
            title: self.title.unwrap_or_default(),
            excerpt,
            content,
            cover_image: self.cover_image.and_then(|image| image.url),
            category,
            tags,
            date,
            read_time: self
                .read_time_in_minutes
                .filter(|minutes| *minutes > 0)
                .unwrap_or(DEFAULT_READ_TIME),
            source: Source::Remote,
            author: self.author.map(|author| Author {
                name: author.name,
                username: author.username,
                profile_picture: author.profile_picture,
            }),
            url: self.url,
            published_at: self.published_at,
        }
    }
}

/// UTC calendar date of an RFC 3339 timestamp. Anything unparseable keeps
/// the part before the `T` separator.
fn calendar_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.with_timezone(&Utc).date_naive().to_string(),
        Err(_) => timestamp.split('T').next().unwrap_or_default().to_owned(),
    }
}

/// Blog posts from the headless blog platform.
///
/// None of these operations substitute fallback content on failure; the
/// caller decides between an error state and a retry.
#[derive(Debug, Clone)]
pub struct BlogGateway {
    client: GraphqlClient,
    host: String,
}

impl BlogGateway {
    pub fn new(http: Client, config: &BlogConfig) -> Self {
        Self {
            client: GraphqlClient::new(http, config.api_url.clone()),
            host: config.host(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// One page of posts. `first` is clamped to at least one; the remote
    /// service may clamp the upper end.
    pub async fn list_posts(&self, first: u32, after: Option<&str>) -> Result<PostPage, FetchError> {
        let outcome = self.fetch_posts(first.max(1), after).await;
        policy::propagate(Operation::ListPosts, outcome)
    }

    async fn fetch_posts(&self, first: u32, after: Option<&str>) -> Result<PostPage, FetchError> {
        let variables = json!({ "host": self.host, "first": first, "after": after });
        let data: PublicationData = self.client.request(GET_PUBLICATION_POSTS, variables).await?;
        let publication = data.publication.ok_or(FetchError::MissingData("publication"))?;
        let connection = publication
            .posts
            .ok_or(FetchError::MissingData("publication.posts"))?;

        let posts: Vec<Post> = connection
            .edges
            .into_iter()
            .map(|edge| edge.node.into_post())
            .collect();
        let (has_next_page, end_cursor) = connection
            .page_info
            .map(|info| (info.has_next_page, info.end_cursor))
            .unwrap_or((false, None));
        info!(host = %self.host, count = posts.len(), has_next_page, "fetched blog posts");

        Ok(PostPage {
            posts,
            has_next_page,
            end_cursor,
        })
    }

    /// `Ok(None)` means the slug exists neither on the blog nor in the
    /// built-in set. Slugs are matched exactly: an empty slug or one with
    /// surrounding whitespace is not found, without a request.
    pub async fn get_post(&self, slug: &str) -> Result<Option<Post>, FetchError> {
        if slug.is_empty() || slug.trim() != slug {
            return Ok(None);
        }
        let outcome = self.fetch_post(slug).await;
        let remote = policy::propagate(Operation::GetPost, outcome)?;
        Ok(remote.or_else(|| {
            debug!(slug, "post not on the blog, checking built-in posts");
            fallback::post(slug)
        }))
    }

    async fn fetch_post(&self, slug: &str) -> Result<Option<Post>, FetchError> {
        let variables = json!({ "host": self.host, "slug": slug });
        let data: PublicationData = self.client.request(GET_POST_BY_SLUG, variables).await?;
        let publication = data.publication.ok_or(FetchError::MissingData("publication"))?;
        Ok(publication.post.map(RawPost::into_post))
    }

    pub async fn publication_info(&self) -> Result<Option<Publication>, FetchError> {
        let variables = json!({ "host": self.host });
        let outcome = self
            .client
            .request::<PublicationData>(GET_PUBLICATION_INFO, variables)
            .await
            .map(|data| {
                data.publication.map(|publication| Publication {
                    title: publication.title.unwrap_or_default(),
                    about: publication.about.and_then(|about| about.text),
                    url: publication.url.unwrap_or_default(),
                })
            });
        policy::propagate(Operation::PublicationInfo, outcome)
    }

    /// The built-in posts, for callers that choose to render them when the
    /// blog is unreachable.
    pub fn fallback_posts(&self) -> Vec<Post> {
        fallback::posts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: serde_json::Value) -> RawPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalizes_full_node() {
        let post = raw(json!({
            "id": "abc",
            "slug": "hello-rust",
            "title": "Hello Rust",
            "subtitle": "sub",
            "brief": "brief text",
            "content": { "markdown": "# md", "html": "<h1>md</h1>" },
            "publishedAt": "2024-10-15T22:30:00.000+02:00",
            "readTimeInMinutes": 7,
            "tags": [{ "id": "1", "name": "Rust", "slug": "rust" }, { "id": "2", "name": "Async", "slug": "async" }],
            "coverImage": { "url": "https://cdn/cover.png" },
            "author": { "name": "Favour", "username": "favour", "profilePicture": null },
            "url": "https://kells.hashnode.dev/hello-rust"
        }))
        .into_post();

        assert_eq!(post.slug, "hello-rust");
        assert_eq!(post.excerpt, "brief text");
        assert_eq!(post.content, "<h1>md</h1>");
        assert_eq!(post.category, "Rust");
        assert_eq!(post.tags, ["Rust", "Async"]);
        assert_eq!(post.date, "2024-10-15");
        assert_eq!(post.read_time, 7);
        assert_eq!(post.source, Source::Remote);
        assert_eq!(post.cover_image.as_deref(), Some("https://cdn/cover.png"));
        assert_eq!(post.author.as_ref().map(|a| a.username.as_str()), Some("favour"));
    }

    #[test]
    fn sparse_node_gets_defaults() {
        let post = raw(json!({
            "id": "abc",
            "slug": "bare",
            "title": "Bare",
            "brief": "",
            "subtitle": "fallback subtitle",
            "content": { "markdown": "body", "html": "" },
            "publishedAt": "2024-01-02T03:04:05Z",
            "readTimeInMinutes": 0,
            "tags": []
        }))
        .into_post();

        assert_eq!(post.excerpt, "fallback subtitle");
        assert_eq!(post.content, "body");
        assert_eq!(post.category, "General");
        assert!(post.tags.is_empty());
        assert_eq!(post.read_time, 5);
        assert!(post.author.is_none());
    }

    #[test]
    fn calendar_date_uses_utc() {
        assert_eq!(calendar_date("2024-10-15T23:30:00-02:00"), "2024-10-16");
        assert_eq!(calendar_date("2024-10-15Tgarbage"), "2024-10-15");
    }
}
