use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::config::CmsConfig;
use crate::error::FetchError;
use crate::fallback;
use crate::graphql::GraphqlClient;
use crate::models::{Project, RichText, Seo};
use crate::policy::{self, Operation, Resolved};

const DEFAULT_CATEGORY: &str = "general";

macro_rules! rich_fields {
    () => {
        "id title slug description
         caseStudy { raw html markdown text }
         category featured publishedAt updatedAt createdAt
         tags technologies liveUrl githubUrl
         coverImage { id url }
         gallery { id url }
         content { raw html markdown text }
         seo { title description keywords }"
    };
}

pub const LIST_PROJECTS_RICH: &str = concat!(
    "query GetProjects { projects(orderBy: createdAt_DESC) { ",
    rich_fields!(),
    " } }"
);

pub const LIST_PROJECTS_BASIC: &str = "query GetProjectsBasic {
  projects(orderBy: createdAt_DESC) { id title slug description createdAt updatedAt }
}";

pub const LIST_FEATURED_PROJECTS: &str = concat!(
    "query GetFeaturedProjects { projects(where: { featured: true }, orderBy: createdAt_DESC) { ",
    rich_fields!(),
    " } }"
);

pub const GET_PROJECT_BY_SLUG: &str = concat!(
    "query GetProjectBySlug($slug: String!) { project(where: { slug: $slug }) { ",
    rich_fields!(),
    " } }"
);

#[derive(Debug, Deserialize)]
struct ProjectsData<T> {
    projects: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    project: Option<RichProject>,
}

/// Every field the CMS schema may offer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RichProject {
    id: String,
    title: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    case_study: Option<RichText>,
    category: Option<String>,
    featured: Option<bool>,
    published_at: Option<String>,
    updated_at: Option<String>,
    created_at: Option<String>,
    tags: Option<Vec<String>>,
    technologies: Option<Vec<String>>,
    live_url: Option<String>,
    github_url: Option<String>,
    cover_image: Option<Asset>,
    gallery: Option<Vec<Asset>>,
    content: Option<RichText>,
    seo: Option<RawSeo>,
}

/// The fields every version of the schema is guaranteed to have.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BasicProject {
    id: String,
    title: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSeo {
    title: Option<String>,
    description: Option<String>,
    keywords: Option<Vec<String>>,
}

/// A project listing in whichever schema the CMS answered.
#[derive(Debug)]
enum RemoteProjects {
    Rich(Vec<RichProject>),
    Basic(Vec<BasicProject>),
}

impl RemoteProjects {
    fn into_projects(self) -> Vec<Project> {
        match self {
            RemoteProjects::Rich(projects) => projects.into_iter().map(RichProject::into_project).collect(),
            RemoteProjects::Basic(projects) => {
                projects.into_iter().map(BasicProject::into_project).collect()
            }
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn first_present(values: [Option<String>; 2]) -> Option<String> {
    values.into_iter().flatten().find(|value| !value.trim().is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl RichProject {
    fn into_project(self) -> Project {
        let created_at = non_empty(self.created_at);
        Project {
            slug: non_empty(self.slug).unwrap_or_else(|| self.id.clone()),
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            case_study: self.case_study.unwrap_or_default().render(),
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
            featured: self.featured.unwrap_or(false),
            published_at: first_present([self.published_at, created_at.clone()])
                .unwrap_or_else(now_timestamp),
            updated_at: first_present([self.updated_at, created_at]).unwrap_or_else(now_timestamp),
            tags: self.tags.unwrap_or_default(),
            technologies: self.technologies.unwrap_or_default(),
            live_url: non_empty(self.live_url),
            github_url: non_empty(self.github_url),
            cover_image: self.cover_image.and_then(|asset| non_empty(asset.url)),
            gallery: self.gallery.map(|assets| {
                assets
                    .into_iter()
                    .filter_map(|asset| non_empty(asset.url))
                    .collect()
            }),
            content: self.content.and_then(|content| content.render_markup()),
            seo: self.seo.map(|seo| Seo {
                title: seo.title,
                description: seo.description,
                keywords: seo.keywords.unwrap_or_default(),
            }),
        }
    }
}

impl BasicProject {
    fn into_project(self) -> Project {
        let created_at = non_empty(self.created_at);
        Project {
            slug: non_empty(self.slug).unwrap_or_else(|| self.id.clone()),
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            case_study: String::new(),
            category: DEFAULT_CATEGORY.to_owned(),
            featured: false,
            published_at: created_at.clone().unwrap_or_else(now_timestamp),
            updated_at: first_present([self.updated_at, created_at]).unwrap_or_else(now_timestamp),
            tags: Vec::new(),
            technologies: Vec::new(),
            live_url: None,
            github_url: None,
            cover_image: None,
            gallery: None,
            content: None,
            seo: None,
        }
    }
}

fn only_featured(projects: Vec<Project>) -> Vec<Project> {
    projects.into_iter().filter(|project| project.featured).collect()
}

/// Portfolio case studies from the structured-content CMS.
///
/// Without an endpoint and token no request is ever made: listings serve the
/// built-in projects and lookups return `None`.
#[derive(Debug, Clone)]
pub struct ProjectGateway {
    client: Option<GraphqlClient>,
}

impl ProjectGateway {
    pub fn new(http: Client, config: &CmsConfig) -> Self {
        let client = config
            .credentials()
            .map(|creds| GraphqlClient::new(http, creds.endpoint).with_bearer(creds.token));
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&GraphqlClient, FetchError> {
        self.client.as_ref().ok_or(FetchError::Unconfigured)
    }

    pub async fn list_projects(&self) -> Vec<Project> {
        self.list_projects_resolved().await.into_inner()
    }

    pub async fn list_projects_resolved(&self) -> Resolved<Vec<Project>> {
        let outcome = self.fetch_projects().await.map(RemoteProjects::into_projects);
        policy::with_fallback(Operation::ListProjects, outcome, fallback::projects)
    }

    /// Rich query first; a schema that lacks some of the rich fields gets a
    /// second, basic query.
    async fn fetch_projects(&self) -> Result<RemoteProjects, FetchError> {
        let client = self.client()?;
        let rich = client
            .request::<ProjectsData<RichProject>>(LIST_PROJECTS_RICH, json!({}))
            .await
            .and_then(|data| data.projects.ok_or(FetchError::MissingData("projects")));

        match rich {
            Ok(projects) => {
                info!(count = projects.len(), "fetched projects with full fields");
                Ok(RemoteProjects::Rich(projects))
            }
            Err(err) => {
                warn!(error = %err, "full project query failed, retrying with basic fields");
                let data: ProjectsData<BasicProject> =
                    client.request(LIST_PROJECTS_BASIC, json!({})).await?;
                let projects = data.projects.ok_or(FetchError::MissingData("projects"))?;
                info!(count = projects.len(), "fetched projects with basic fields");
                Ok(RemoteProjects::Basic(projects))
            }
        }
    }

    pub async fn list_featured_projects(&self) -> Vec<Project> {
        self.list_featured_projects_resolved().await.into_inner()
    }

    /// Featured projects via the CMS filter, or the full listing filtered
    /// locally when the schema has no `featured` predicate.
    pub async fn list_featured_projects_resolved(&self) -> Resolved<Vec<Project>> {
        let client = match self.client() {
            Ok(client) => client,
            Err(err) => {
                return policy::with_fallback(
                    Operation::ListFeaturedProjects,
                    Err(err),
                    fallback::featured_projects,
                )
            }
        };

        let featured = client
            .request::<ProjectsData<RichProject>>(LIST_FEATURED_PROJECTS, json!({}))
            .await
            .and_then(|data| data.projects.ok_or(FetchError::MissingData("projects")));
        match featured {
            Ok(projects) => Resolved::succeeded(only_featured(
                projects.into_iter().map(RichProject::into_project).collect(),
            )),
            Err(err) => {
                warn!(error = %err, "featured project query failed, filtering full listing");
                self.list_projects_resolved().await.map(only_featured)
            }
        }
    }

    /// `None` when the project does not exist, the CMS is not configured, or
    /// the lookup failed.
    pub async fn get_project(&self, slug: &str) -> Option<Project> {
        let outcome = self.fetch_project(slug).await;
        policy::with_fallback(Operation::GetProject, outcome, || None).into_inner()
    }

    async fn fetch_project(&self, slug: &str) -> Result<Option<Project>, FetchError> {
        let client = self.client()?;
        let data: ProjectData = client
            .request(GET_PROJECT_BY_SLUG, json!({ "slug": slug }))
            .await?;
        Ok(data.project.map(RichProject::into_project))
    }
}
