use std::sync::Arc;

use portfolio_core::{BlogGateway, GatewayConfig, ProjectGateway};
use reqwest::Client;

use crate::mailer::ContactMailer;

#[derive(Clone)]
pub struct AppState {
    pub blog: BlogGateway,
    pub projects: ProjectGateway,
    pub mailer: Option<Arc<ContactMailer>>,
}

impl AppState {
    pub fn new(http: Client, config: &GatewayConfig, mailer: Option<ContactMailer>) -> Self {
        Self {
            blog: BlogGateway::new(http.clone(), &config.blog),
            projects: ProjectGateway::new(http, &config.cms),
            mailer: mailer.map(Arc::new),
        }
    }
}
