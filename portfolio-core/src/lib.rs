pub mod blog;
pub mod config;
pub mod contact;
pub mod error;
pub mod fallback;
pub mod graphql;
pub mod models;
pub mod policy;
pub mod projects;

pub use blog::BlogGateway;
pub use config::{BlogConfig, CmsConfig, GatewayConfig};
pub use contact::{ContactEmail, ContactMessage};
pub use error::{ConfigError, ContactError, FetchError};
pub use graphql::GraphqlClient;
pub use models::{Author, Post, PostPage, Project, Publication, RichText, Seo, Source};
pub use policy::{FailurePolicy, FetchState, Operation, Resolved};
pub use projects::ProjectGateway;
