use subscribers::{config::get_or_init_config, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        subscribers::init_production_tracing();
    }
    #[cfg(debug_assertions)]
    {
        subscribers::init_dbg_tracing();
    }

    let config = get_or_init_config();
    let app = App::build_from_config(config).await?;

    subscribers::serve(app).await?;

    Ok(())
}
