use mimalloc::MiMalloc;
use shopkit_core::Config;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, app) = shopkit_api::setup::initialize_app(config.clone()).await?;

    shopkit_api::setup::server::start_server(&config, app).await
}
