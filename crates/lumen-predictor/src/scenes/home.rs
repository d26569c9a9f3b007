use lumen_ui::UiContext;
use lumen_ui::widgets::{label, pill, title};

#[derive(Debug, Default)]
pub struct HomeScene;

impl HomeScene {
    pub fn draw(&mut self, ui: &mut UiContext<'_>) {
        title(ui, "L-Nutra Predictor", 24.0, 36.0);
        label(
            ui,
            "Everything in this window is drawn immediate-mode on the GPU. Use the nav to try Predictions or view Ops data.",
            26.0,
            72.0,
        );
        pill(ui, "Immediate mode • Fast • Minimal", 28.0, 110.0);
    }
}
