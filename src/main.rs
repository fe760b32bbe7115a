use anyhow::Result;
use newsdesk_core::application::{
    ports::{channel::ChannelPublisher, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, Collaborators, fanout::ArticleLinks},
};
use newsdesk_core::config::AppConfig;
use newsdesk_core::domain::article::{
    ArticleReadRepository, ArticleWriteRepository, EditorialCalendar,
};
use newsdesk_core::infrastructure::{
    channels::{FacebookPublisher, TelegramPublisher, TwitterPublisher},
    database,
    media::CloudinaryUploader,
    repositories::{InMemoryArticleRepository, PostgresArticleRepository},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use newsdesk_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

type Repositories = (Arc<dyn ArticleWriteRepository>, Arc<dyn ArticleReadRepository>);

async fn repositories(config: &AppConfig) -> Result<Repositories> {
    if config.uses_memory_store() {
        tracing::warn!("using the in-memory article store; nothing survives a restart");
        let repo = Arc::new(InMemoryArticleRepository::default());
        let write: Arc<dyn ArticleWriteRepository> = repo.clone();
        let read: Arc<dyn ArticleReadRepository> = repo;
        return Ok((write, read));
    }

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let repo = Arc::new(PostgresArticleRepository::new(pool));
    let write: Arc<dyn ArticleWriteRepository> = repo.clone();
    let read: Arc<dyn ArticleReadRepository> = repo;
    Ok((write, read))
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let (article_write_repo, article_read_repo) = repositories(&config).await?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let facebook = Arc::new(FacebookPublisher::new(http_client.clone(), config.facebook()));
    let twitter = Arc::new(TwitterPublisher::new(http_client.clone(), config.twitter()));
    let telegram = Arc::new(TelegramPublisher::new(http_client.clone(), config.telegram()));

    let publishers: Vec<Arc<dyn ChannelPublisher>> = vec![
        telegram as Arc<dyn ChannelPublisher>,
        Arc::clone(&facebook) as Arc<dyn ChannelPublisher>,
        Arc::clone(&twitter) as Arc<dyn ChannelPublisher>,
    ];
    let collaborators = Collaborators {
        uploader: Arc::new(CloudinaryUploader::new(http_client, config.cloudinary())),
        publishers,
        social_feed: facebook,
        timeline: twitter,
    };

    let calendar = EditorialCalendar::from_offset_minutes(config.editorial_utc_offset_minutes())?;
    let links = ArticleLinks::new(config.frontend_url(), config.article_path_prefix());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        collaborators,
        config.fanout_timeout(),
        links,
        calendar,
        clock,
        slugger,
    ));

    let state = HttpState { services };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
