use std::env;

use anyhow::{Context, Result};
use portfolio_core::{graphql::CLIENT_USER_AGENT, GatewayConfig};
use portfolio_server::{create_router, AppState, ContactMailer, MailSettings};
use reqwest::{redirect, ClientBuilder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = GatewayConfig::load();
    info!(
        blog_host = %config.blog.host(),
        cms_configured = config.cms.is_configured(),
        "loaded gateway configuration"
    );

    let http = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent(CLIENT_USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    let mailer = match MailSettings::from_env() {
        Some(settings) => Some(ContactMailer::build(settings)?),
        None => {
            warn!("EMAIL_USER/EMAIL_PASSWORD not set, contact form delivery disabled");
            None
        }
    };

    let app = create_router(AppState::new(http, &config, mailer));

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", bind_addr, port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
