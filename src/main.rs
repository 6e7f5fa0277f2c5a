use anyhow::Context;
use bookswap_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Bookswap settings")?;
    bookswap_telemetry::init(&settings.telemetry)?;

    bookswap_app::bootstrap::run(settings).await
}
