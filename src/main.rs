use std::sync::Arc;

use quickget::config::Settings;
use quickget::lifecycle::{CodePresenter, Controller};
use quickget::logger;
use quickget::serving::{ServingConfig, SharedServing};

/// Headless stand-in for the code-rendering collaborator: the scannable
/// image is someone else's job, the URL it would encode goes to the log.
struct LogPresenter;

impl CodePresenter for LogPresenter {
    fn present(&self, url: &str) {
        logger::log_external_url(url);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = settings.workers {
        runtime_builder.worker_threads(workers);
        println!("[Config] Using {workers} worker threads");
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(settings))
}

async fn async_main(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(file) = settings.file.clone() else {
        return Err("no file configured; set QG_FILE or `file` in quickget.toml".into());
    };

    let serving = ServingConfig::new(file, settings.served_name(), settings.mime_type())?;
    let shared = Arc::new(SharedServing::new(serving));
    let mut controller = Controller::new(
        Arc::clone(&shared),
        settings.url.clone(),
        Box::new(LogPresenter),
    );

    if !settings.start {
        println!("[Server] Autostart disabled (QG_START=false), nothing to do");
        return Ok(());
    }

    controller.on_start(settings.port).await?;

    tokio::signal::ctrl_c().await?;
    println!("\n[Server] Shutdown requested");
    controller.on_stop().await;
    Ok(())
}
