use anyhow::Context;
use erpreport_api::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    match config.as_ref().map(|c| c.log_format) {
        Ok(LogFormat::Pretty) => erpreport_observability::init_pretty(),
        _ => erpreport_observability::init(),
    }

    let config = config.context("invalid configuration")?;
    let app = erpreport_api::app::build_app(&config).context("failed to build upstream clients")?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        document_failure_policy = ?config.document_failure_policy,
        log_format = ?config.log_format,
        "reporting api listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
