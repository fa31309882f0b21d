use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;

use order_cache_service::config::Config;
use order_cache_service::domain::ports::OrderCache;
use order_cache_service::infrastructure::cache::MemoryCache;
use order_cache_service::infrastructure::order_repo::DieselOrderRepository;
use order_cache_service::messaging::consumer::Consumer;
use order_cache_service::messaging::handler::CreateOrderHandler;
use order_cache_service::messaging::kafka::KafkaSource;
use order_cache_service::{build_server, create_pool, run_migrations, OrderService};

fn fatal(msg: &str, err: impl std::fmt::Display) -> ! {
    log::error!("{}: {}", msg, err);
    std::process::exit(1);
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => fatal("failed to install SIGTERM handler", e),
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cfg = Config::from_env().unwrap_or_else(|e| fatal("invalid configuration", e));

    let pool = create_pool(&cfg.database.url(), cfg.database.pool_size)
        .unwrap_or_else(|e| fatal("error creating connection pool", e));
    if let Err(e) = run_migrations(&pool) {
        fatal("failed to apply database schema", e);
    }

    let repo = Arc::new(DieselOrderRepository::new(pool.clone()));
    let shutdown = CancellationToken::new();

    let mut sweeper = None;
    let cache: Option<Arc<dyn OrderCache>> = if cfg.cache.enabled {
        let cache = Arc::new(MemoryCache::new(
            Arc::clone(&repo),
            cfg.cache.default_expiration,
            cfg.cache.cleanup_interval,
        ));
        let limit = cfg.cache.preload_limit;
        let preloading = Arc::clone(&cache);
        match tokio::task::spawn_blocking(move || preloading.preload(limit)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => fatal("cache bootstrap failed", e),
            Err(e) => fatal("cache bootstrap panicked", e),
        }
        sweeper = cache.spawn_sweeper(shutdown.clone());
        Some(cache)
    } else {
        log::info!("cache disabled, reads go straight to the database");
        None
    };

    let service = web::Data::new(OrderService::new(Arc::clone(&repo), cache));

    let source = KafkaSource::new(&cfg.kafka)
        .unwrap_or_else(|e| fatal("failed to create kafka consumer", e));
    let handler = Arc::new(CreateOrderHandler::new(service.clone().into_inner()));
    let consumer = tokio::spawn(Consumer::new(source, handler).run(shutdown.clone()));
    log::info!("kafka consumer started");

    let server = build_server(
        service,
        &cfg.http.host,
        cfg.http.port,
        cfg.shutdown_timeout.as_secs(),
    )?;
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    log::info!(
        "Starting server at http://{}:{}",
        cfg.http.host,
        cfg.http.port
    );

    shutdown_signal().await;
    log::info!("shutdown signal received");

    log::info!("shutting down HTTP server...");
    let forced = tokio::time::timeout(cfg.shutdown_timeout, server_handle.stop(true))
        .await
        .is_err();
    if forced {
        log::error!("timeout exceeded, forcing shutdown");
        server_handle.stop(false).await;
    }
    server_task.abort();

    shutdown.cancel();
    match consumer.await {
        Ok(stats) => log::info!("consumer stopped: {:?}", stats),
        Err(e) => log::error!("consumer task failed: {}", e),
    }
    if let Some(sweeper) = sweeper {
        if let Err(e) = sweeper.await {
            log::error!("cache sweeper task failed: {}", e);
        }
    }

    log::info!("closing database pool...");
    drop(repo);
    drop(pool);

    if forced {
        std::process::exit(1);
    }
    Ok(())
}
