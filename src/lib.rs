pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod messaging;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;

pub use application::order_service::OrderService;
pub use db::{create_pool, DbPool};
pub use domain::ports::OrderStore;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(handlers::orders::get_order),
    components(schemas(
        domain::order::Order,
        domain::order::Delivery,
        domain::order::Payment,
        domain::order::Item
    )),
    tags((name = "orders", description = "Order lookup"))
)]
pub struct ApiDoc;

/// Apply the embedded schema migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// OS signal handling is disabled; the caller owns shutdown through the
/// server handle. The caller is responsible for `.await`-ing (or
/// `tokio::spawn`-ing) the returned server.
pub fn build_server<R: OrderStore>(
    service: web::Data<OrderService<R>>,
    host: &str,
    port: u16,
    shutdown_timeout_secs: u64,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .route("/api-docs/openapi.json", web::get().to(openapi_json))
            .service(
                web::scope("/orders")
                    .route("/{id}", web::get().to(handlers::orders::get_order::<R>)),
            )
    })
    .disable_signals()
    .shutdown_timeout(shutdown_timeout_secs)
    .bind((host.to_string(), port))?
    .run())
}
