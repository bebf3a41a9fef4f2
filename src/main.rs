use std::process;
use std::sync::Arc;

use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use vetrina::{
    application::{
        blocks::BlockService,
        error::AppError,
        pages::CompositionService,
        repos::{BlocksRepo, BlocksWriteRepo, CasesRepo, CustomPagesRepo, LandingPagesRepo},
        trust::trust_gate,
    },
    cache::{CacheConfig, CacheConsumer, CacheTrigger, CachedBlocksRepo, EventQueue, ListingStore},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{HttpState, build_router},
        telemetry,
    },
    presentation::views::SiteChrome,
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let state = build_http_state(repositories, &settings);

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "vetrina::serve",
        addr = %settings.server.public_addr,
        "Listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install shutdown signal handler");
    }
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_http_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> HttpState {
    let writer: Arc<dyn BlocksWriteRepo> = repositories.clone();
    let landing_pages: Arc<dyn LandingPagesRepo> = repositories.clone();
    let cases: Arc<dyn CasesRepo> = repositories.clone();
    let custom_pages: Arc<dyn CustomPagesRepo> = repositories.clone();

    let cache_config = CacheConfig::from(&settings.cache);
    let (reader, cache_trigger): (Arc<dyn BlocksRepo>, Option<Arc<CacheTrigger>>) =
        if cache_config.is_enabled() {
            let store = Arc::new(ListingStore::new(&cache_config));
            let queue = Arc::new(EventQueue::new());
            let consumer = Arc::new(CacheConsumer::new(store.clone(), queue.clone()));
            let trigger = Arc::new(CacheTrigger::new(cache_config, queue, consumer));
            let cached: Arc<dyn BlocksRepo> =
                Arc::new(CachedBlocksRepo::new(repositories.clone(), store));
            (cached, Some(trigger))
        } else {
            (repositories.clone(), None)
        };

    let blocks = BlockService::new(reader, writer).with_cache_trigger_opt(cache_trigger);
    let composition = CompositionService::new(
        landing_pages,
        cases,
        custom_pages,
        blocks.clone(),
        trust_gate(),
    );

    HttpState {
        composition: Arc::new(composition),
        blocks: Arc::new(blocks),
        chrome: SiteChrome {
            brand_title: settings.site.brand_title.clone(),
            footer_copy: settings.site.footer_copy.clone(),
        },
        db: repositories,
    }
}
