use lumen_engine::coords::Rect;
use lumen_ui::UiContext;
use lumen_ui::widgets::{button, label, label_colored, table_header, table_row, title};

use crate::api::ApiError;
use crate::config::ApiConfig;
use crate::tasks::{Generation, Request};

const TABLE_X: f32 = 24.0;
const TABLE_Y: f32 = 150.0;
const COL_WIDTHS: [f32; 2] = [40.0, 400.0];
const ROW_STEP: f32 = 34.0;
const RELOAD: Rect = Rect::new(380.0, 60.0, 104.0, 32.0);

/// API settings and the model's feature columns, fetched on first view.
#[derive(Debug, Default)]
pub struct OpsScene {
    api_base: String,
    has_basic: bool,
    features: Vec<String>,
    loading: bool,
    fetched: bool,
    err: Option<String>,
    generation: Generation,
}

impl OpsScene {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            api_base: api.base_url.clone(),
            has_basic: api.has_basic_auth(),
            ..Default::default()
        }
    }

    pub fn draw(&mut self, ui: &mut UiContext<'_>, out: &mut Vec<Request>) {
        title(ui, "Ops", 24.0, 36.0);
        label(ui, &format!("API_BASE: {}", self.api_base), 26.0, 68.0);
        label(ui, &format!("Has Basic: {}", if self.has_basic { "yes" } else { "no" }), 26.0, 92.0);

        let reload_text = if self.loading { "Loading..." } else { "Reload" };
        if button(ui, "ops_reload", RELOAD, reload_text) {
            // A fetch still in flight is superseded by the new generation.
            self.fetched = false;
            self.loading = false;
        }

        if !self.fetched && !self.loading {
            self.loading = true;
            self.generation += 1;
            out.push(Request::Features { generation: self.generation });
        }

        if let Some(err) = &self.err {
            let color = ui.theme.error_text;
            label_colored(ui, err, 26.0, 124.0, color);
        }

        let width = COL_WIDTHS[0] + COL_WIDTHS[1] + 20.0;
        table_header(ui, &["#", "Feature name"], TABLE_X, TABLE_Y, width, &COL_WIDTHS);

        let mut ty = TABLE_Y + 36.0;
        for (i, name) in self.features.iter().enumerate() {
            if ty > ui.height {
                break;
            }
            table_row(ui, &[(i + 1).to_string().as_str(), name.as_str()], TABLE_X, ty, width, &COL_WIDTHS, i % 2 == 1);
            ty += ROW_STEP;
        }
    }

    pub fn apply_features(&mut self, generation: Generation, result: Result<Vec<String>, ApiError>) {
        if generation != self.generation {
            log::debug!("dropping feature list from generation {generation}");
            return;
        }
        match result {
            Ok(features) => {
                log::info!("loaded {} feature columns", features.len());
                self.features = features;
                self.err = None;
            }
            Err(err) => {
                log::warn!("feature list: {err}");
                self.err = Some(err.to_string());
            }
        }
        self.loading = false;
        self.fetched = true;
    }
}
