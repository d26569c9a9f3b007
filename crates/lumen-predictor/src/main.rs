//! L-Nutra Predictor: a small desktop client for the prediction API.
//!
//! ```text
//! lumen-predictor --api-base http://localhost:8000 --basic-auth ops:secret
//! ```

mod api;
mod config;
mod form;
mod host;
mod scenes;
mod shell;
mod tasks;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_engine::device::GpuInit;
use lumen_engine::logging::init_logging;
use lumen_engine::text::FontSystem;
use lumen_engine::window::Runtime;
use lumen_ui::Theme;

use crate::api::ApiClient;
use crate::config::{load_font_bytes, Cli};
use crate::host::PredictorApp;
use crate::shell::Shell;
use crate::tasks::Tasks;

fn main() -> Result<()> {
    let config = Cli::parse().into_config();
    init_logging(config.logging.clone());

    let mut theme = Theme::dark();
    let mut fonts = FontSystem::new();
    match load_font_bytes(&config.font_paths) {
        Some(bytes) => match fonts.load_font(&bytes) {
            Ok(id) => theme = theme.with_fonts(id, id, id),
            Err(err) => log::warn!("font rejected: {err}"),
        },
        None => log::warn!("no font found; text will not be drawn (pass --font)"),
    }

    if config.api.base_url.is_empty() {
        log::warn!("API base URL is empty; set --api-base or LUMEN_API_BASE");
    }

    let runtime = Runtime::new()?;
    let client = ApiClient::new(&config.api).context("failed to build HTTP client")?;
    let tasks = Tasks::new(client, runtime.waker())?;

    let app = PredictorApp::new(Shell::new(&config.api), theme, fonts, tasks);
    runtime.run(config.window, GpuInit::default(), app)
}
