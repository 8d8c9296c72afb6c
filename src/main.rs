use playbar::{
    config::Settings,
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};
use tracing::info;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> color_eyre::Result<()> {
    let settings = setup()?;

    let mut app = App::new(settings).await?;
    app.run().await
}

fn setup() -> color_eyre::Result<Settings> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;

    set_panic_hook();
    initialize_logging(&settings.log.level)?;
    info!(base_url = %settings.api.base_url, "playbar_starting");

    Ok(settings)
}
