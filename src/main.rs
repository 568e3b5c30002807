mod app;

use app::MyApp;
use flashcards_app::config::Config;
use flashcards_app::tasks::TaskManager;
use log::info;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    info!("Using flashcards API at {}", config.api_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AI Flashcards",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let tasks = TaskManager::new(&config, move || ctx.request_repaint())?;
            Ok(Box::new(MyApp::new(config, tasks)))
        }),
    )
}
