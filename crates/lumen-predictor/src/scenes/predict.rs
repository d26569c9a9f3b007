use lumen_engine::coords::Rect;
use lumen_ui::UiContext;
use lumen_ui::widgets::{
    button, code_block, label, label_colored, table_header, table_row, text_input, title,
    TextInputOptions,
};
use serde_json::Value;

use crate::api::ApiError;
use crate::form::{PredictForm, FIELDS};
use crate::tasks::{Generation, Request};

const FORM_X: f32 = 24.0;
const FORM_Y: f32 = 80.0;
const FIELD_W: f32 = 290.0;
const FIELD_H: f32 = 34.0;
const FIELD_STEP: f32 = 54.0;

const RESULT_X: f32 = FORM_X + 320.0;
const MIRROR_Y: f32 = 400.0;
const MIRROR_COLS: [f32; 2] = [220.0, 220.0];
const MIRROR_ROWS: usize = 10;
const ROW_STEP: f32 = 34.0;

const EMPTY_RESULT: &str = "{\n  /* submit to see result */\n}";

fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Prediction form, result panel and a table mirroring the coerced inputs.
#[derive(Debug, Default)]
pub struct PredictScene {
    form: PredictForm,
    loading: bool,
    err: Option<String>,
    result_text: Option<String>,
    generation: Generation,
}

impl PredictScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Y of the Predict button: one step below the last field.
    fn button_rect() -> Rect {
        Rect::new(FORM_X, FORM_Y + FIELDS.len() as f32 * FIELD_STEP, 140.0, 38.0)
    }

    pub fn draw(&mut self, ui: &mut UiContext<'_>, out: &mut Vec<Request>) {
        title(ui, "Prediction", 24.0, 36.0);

        let numeric = TextInputOptions::numeric();
        let plain = TextInputOptions::default();
        for (i, field) in FIELDS.iter().enumerate() {
            let y = FORM_Y + i as f32 * FIELD_STEP;
            label(ui, field.label, FORM_X, y - 14.0);

            let value = self.form.value(i).to_string();
            let opts = if field.kind.numeric_input() { &numeric } else { &plain };
            let form = &mut self.form;
            text_input(
                ui,
                field.key,
                Rect::new(FORM_X, y, FIELD_W, FIELD_H),
                &value,
                |v| form.set(i, v),
                opts,
            );
        }

        let caption = if self.loading { "Predicting..." } else { "Predict" };
        if button(ui, "predict_btn", Self::button_rect(), caption) && !self.loading {
            self.loading = true;
            self.err = None;
            self.generation += 1;
            out.push(Request::Predict {
                generation: self.generation,
                features: self.form.features(),
            });
            ui.request_redraw();
        }

        title(ui, "Result", RESULT_X, 36.0);
        if let Some(err) = &self.err {
            let color = ui.theme.error_text;
            label_colored(ui, &format!("Error: {err}"), RESULT_X, 68.0, color);
        }

        let block = Rect::new(
            RESULT_X,
            80.0,
            600f32.min(ui.width - RESULT_X - 24.0).max(0.0),
            300f32.min(ui.height - 120.0).max(0.0),
        );
        code_block(ui, self.result_text.as_deref().unwrap_or(EMPTY_RESULT), block);

        let width = MIRROR_COLS[0] + MIRROR_COLS[1] + 20.0;
        table_header(ui, &["Feature", "Value"], RESULT_X, MIRROR_Y, width, &MIRROR_COLS);
        let mut ry = MIRROR_Y + 36.0;
        for (i, row) in self.form.rows().iter().take(MIRROR_ROWS).enumerate() {
            table_row(ui, row, RESULT_X, ry, width, &MIRROR_COLS, i % 2 == 1);
            ry += ROW_STEP;
        }
    }

    pub fn apply_prediction(&mut self, generation: Generation, result: Result<Value, ApiError>) {
        if generation != self.generation {
            log::debug!("dropping prediction from generation {generation}");
            return;
        }
        match result {
            Ok(v) => {
                self.result_text = Some(pretty(&v));
                self.err = None;
            }
            Err(err) => {
                log::warn!("prediction: {err}");
                self.result_text = Some(pretty(&err.detail()));
                self.err = Some(err.to_string());
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::harness::Harness;
    use lumen_engine::coords::{Vec2, Viewport};
    use lumen_ui::KeySymbol;

    fn click(h: &mut Harness, x: f32, y: f32) {
        h.state.pointer = Some(Vec2::new(x, y));
        h.state.clicked = true;
    }

    fn click_predict(h: &mut Harness) {
        let r = PredictScene::button_rect();
        click(h, r.origin.x + 5.0, r.origin.y + 5.0);
    }

    #[test]
    fn button_sits_below_last_field() {
        assert_eq!(PredictScene::button_rect(), Rect::new(24.0, 566.0, 140.0, 38.0));
    }

    #[test]
    fn first_frame_shows_defaults_and_placeholder_result() {
        let mut h = Harness::new();
        let mut scene = PredictScene::new();
        h.frame(|ui, out| scene.draw(ui, out));
        assert!(h.has_text("standard_fmd"));
        assert!(h.has_text("meds_diabetes (0/1)"));
        assert!(h.has_text("  /* submit to see result */"));
        assert!(h.out.is_empty());
    }

    #[test]
    fn predict_click_queues_one_request_and_disables() {
        let mut h = Harness::new();
        let mut scene = PredictScene::new();

        click_predict(&mut h);
        let redraw = h.frame(|ui, out| scene.draw(ui, out));
        assert!(redraw);
        assert!(scene.loading);
        assert!(matches!(h.out.as_slice(), [Request::Predict { generation: 1, .. }]));

        h.frame(|ui, out| scene.draw(ui, out));
        assert!(h.has_text("Predicting..."));

        click_predict(&mut h);
        h.frame(|ui, out| scene.draw(ui, out));
        assert_eq!(h.out.len(), 1);
    }

    #[test]
    fn typed_values_reach_the_request() {
        let mut h = Harness::new();
        let mut scene = PredictScene::new();

        // Focus bmi (third field) and clear it, then type 31.5.
        click(&mut h, 30.0, 80.0 + 2.0 * 54.0 + 5.0);
        h.frame(|ui, out| scene.draw(ui, out));
        for key in ["Backspace", "Backspace", "3", "1", ".", "5"] {
            h.state.key = KeySymbol::from_symbol(key);
            h.frame(|ui, out| scene.draw(ui, out));
        }

        click_predict(&mut h);
        h.frame(|ui, out| scene.draw(ui, out));
        match h.out.as_slice() {
            [Request::Predict { features, .. }] => assert_eq!(features.bmi, 31.5),
            other => panic!("unexpected requests {other:?}"),
        }
    }

    #[test]
    fn success_renders_pretty_json() {
        let mut h = Harness::new();
        let mut scene = PredictScene::new();
        click_predict(&mut h);
        h.frame(|ui, out| scene.draw(ui, out));

        scene.apply_prediction(1, Ok(serde_json::json!({ "risk_category": "low" })));
        h.frame(|ui, out| scene.draw(ui, out));
        assert!(!scene.loading);
        assert!(h.has_text("  \"risk_category\": \"low\""));
        assert!(h.has_text("Predict"));
    }

    #[test]
    fn failure_shows_error_and_body() {
        let mut h = Harness::new();
        let mut scene = PredictScene::new();
        click_predict(&mut h);
        h.frame(|ui, out| scene.draw(ui, out));

        let err = ApiError::Api { status: 422, body: r#"{"detail":"BMI must be between 10 and 60"}"#.into() };
        scene.apply_prediction(1, Err(err));
        h.frame(|ui, out| scene.draw(ui, out));
        assert!(h.has_text("Error: request failed with status code 422"));
        assert!(h.has_text("  \"detail\": \"BMI must be between 10 and 60\""));
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut scene = PredictScene::new();
        scene.loading = true;
        scene.generation = 3;
        scene.apply_prediction(2, Ok(Value::Null));
        assert!(scene.loading);
        assert_eq!(scene.result_text, None);
    }

    #[test]
    fn narrow_window_collapses_result_block() {
        let mut h = Harness::new();
        h.viewport = Viewport::new(320.0, 100.0);
        let mut scene = PredictScene::new();
        h.frame(|ui, out| scene.draw(ui, out));

        let rounded: Vec<_> = h.list.items().iter().filter_map(|i| i.cmd.as_rounded_rect()).collect();
        assert!(rounded.iter().all(|r| r.rect.size.x >= 0.0 && r.rect.size.y >= 0.0));
        let block = rounded.iter().find(|r| r.rect.origin == Vec2::new(RESULT_X, 80.0));
        assert_eq!(block.map(|r| r.rect.size), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn mirror_table_lists_every_field() {
        let mut h = Harness::new();
        let mut scene = PredictScene::new();
        h.frame(|ui, out| scene.draw(ui, out));
        for field in FIELDS {
            assert!(h.has_text(field.key), "{}", field.key);
        }
    }
}
