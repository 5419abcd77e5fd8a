#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use fileup_business::UploaderEnv;
use fileup_ui::FileupApp;
use fileup_ui::state::State;
use fileup_ui::utils::file_picker::SystemFilePicker;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let env = UploaderEnv::init()?;
    log::info!("Uploading to {}", env.autumn_url());

    // Controller cycles are spawned from the UI thread.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([360.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fileup",
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let state = State::new(&env, Arc::new(SystemFilePicker))?;
            Ok(Box::new(FileupApp::new(state)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
