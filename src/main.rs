// Conference schedule builder
// Main entry point

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use schedule_builder::services::api::GraphqlClient;
use schedule_builder::services::settings::ConfigLoader;
use schedule_builder::ui_egui::ScheduleBuilderApp;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting schedule builder");

    let config = ConfigLoader::from_environment()
        .load()
        .context("Failed to load configuration")?;
    log::info!(
        "Editing schedule of {} via {}",
        config.conference_code,
        config.api_url
    );

    let api = GraphqlClient::new(&config).context("Failed to create API client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Schedule Builder - {}", config.conference_code))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Schedule Builder",
        options,
        Box::new(move |cc| {
            let app = ScheduleBuilderApp::new(cc, config, Arc::new(api))?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|err| anyhow!("Application error: {}", err))
}
