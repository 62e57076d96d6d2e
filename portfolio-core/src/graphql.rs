use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

pub const CLIENT_USER_AGENT: &str = "Portfolio-Blog/1.0";

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}

/// Minimal GraphQL-over-HTTP client: one POST per query, JSON in and out.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: Client,
    endpoint: String,
    bearer: Option<String>,
}

impl GraphqlClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            bearer: None,
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs `query` and decodes the `data` member into `T`.
    ///
    /// A non-2xx status, a body that is not a GraphQL envelope, a non-empty
    /// `errors` array and a null `data` are all reported as errors.
    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, FetchError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(&GraphqlRequest {
                query,
                variables: &variables,
            });
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let envelope: GraphqlResponse = serde_json::from_slice(&bytes)?;
        if let Some(first) = envelope.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(FetchError::Remote(first.message));
        }

        let data = envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or(FetchError::MissingData("data"))?;
        debug!(endpoint = %self.endpoint, bytes = bytes.len(), "graphql query succeeded");
        Ok(serde_json::from_value(data)?)
    }
}
