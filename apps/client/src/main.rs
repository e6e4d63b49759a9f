use anyhow::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_client::config::Config;
use resume_client::remote::LoginCredentials;
use resume_client::views::{dashboard_summary, format_file_size};
use resume_client::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume client v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::init(config).await?;

    // Log every resume-state change the way a screen would observe it
    let mut resume_updates = state.resumes.subscribe();
    tokio::spawn(async move {
        while resume_updates.changed().await.is_ok() {
            let snapshot = resume_updates.borrow_and_update().clone();
            debug!(
                "Resume state: {} resume(s), loading={}, error={:?}",
                snapshot.resumes.len(),
                snapshot.is_loading,
                snapshot.error
            );
        }
    });

    let session = state.session.snapshot();
    match &session.user {
        Some(user) if session.is_authenticated => info!("Welcome back, {}", user.full_name),
        _ => {
            let credentials = LoginCredentials {
                email: state.config.demo_email.clone(),
                password: state.config.demo_password.clone(),
            };
            state.session.login(&credentials).await?;
            info!("Signed in as {}", credentials.email);
        }
    }

    state.resumes.get_resumes().await;
    let resumes = state.resumes.snapshot();
    if let Some(error) = &resumes.error {
        warn!("Resume listing unavailable: {error}");
    }

    let summary = dashboard_summary(&resumes.resumes);
    info!(
        "Dashboard: {} total, {} completed, {} pending",
        summary.total, summary.completed, summary.pending
    );
    for resume in &summary.recent {
        info!(
            "  {} · {} · {}",
            resume.file_name,
            format_file_size(resume.file_size),
            resume.optimization_status.label()
        );
    }
    info!("{} template(s) available", resumes.templates.len());

    Ok(())
}
