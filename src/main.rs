use anyhow::Context;
use classfinder::config::{Backend, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("classfinder=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env().context("invalid configuration")?;
    classfinder::views::check_templates().context("page template is broken")?;
    let backend_name = match &settings.backend {
        Backend::Rest { .. } => "rest",
        Backend::Sqlite { .. } => "sqlite",
        Backend::Memory => "memory",
    };
    let app_state = classfinder::connect_store(&settings.backend)
        .await
        .context("failed to initialize the class store")?;
    info!(backend = backend_name, "class store ready");

    let app = classfinder::app(app_state);

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
