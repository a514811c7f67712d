use bazaar_adapters::{Argon2Hasher, PostgresUserStore, config::Settings};
use bazaar_service::{StorefrontService, helpers::configure_postgresql};
use color_eyre::eyre::Result;
use rand::RngCore;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if std::env::args().nth(1).as_deref() == Some("generate-secret") {
        println!("{}", generate_secret());
        return Ok(());
    }

    init_tracing()?;

    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    sqlx::migrate!("../migrations").run(&pg_pool).await?;

    let service = StorefrontService::new(
        PostgresUserStore::new(pg_pool),
        Argon2Hasher::new(),
        settings.auth.jwt.auth_config(),
        settings.auth.password_reset.ttl(),
    );

    let allowed_origins = settings.auth.allowed_origins.clone();
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// 32 random bytes, hex encoded, for `auth.jwt.secret`.
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
