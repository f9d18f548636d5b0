use lavka_api::app::{AppServices, build_app};
use lavka_store::ensure_schema;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lavka_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let services = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url).await?;
            ensure_schema(&pool).await?;
            tracing::info!("using postgres-backed stores");
            AppServices::postgres(pool)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            AppServices::in_memory()
        }
    };

    let app = build_app(services, &jwt_secret);

    let bind_addr =
        std::env::var("LAVKA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
