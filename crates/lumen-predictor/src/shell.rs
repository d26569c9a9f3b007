//! Routing and the per-frame UI pass shared by every scene.

use lumen_engine::coords::{Rect, Viewport};
use lumen_engine::input::{InputFrame, InputState};
use lumen_engine::scene::DrawList;
use lumen_engine::text::TextMeasure;
use lumen_ui::widgets::{button, clear};
use lumen_ui::{KeyQueue, Theme, UiContext, UiState};

use crate::config::ApiConfig;
use crate::scenes::{HomeScene, OpsScene, PredictScene};
use crate::tasks::{Request, TaskResult};

const NAV_W: f32 = 96.0;
const NAV_H: f32 = 32.0;
const NAV_GAP: f32 = 8.0;
const NAV_Y: f32 = 18.0;
const NAV_MARGIN: f32 = 24.0;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Predict,
    Ops,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Predict, Route::Ops];

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Predict => "Predict",
            Route::Ops => "Ops",
        }
    }

    fn nav_id(self) -> &'static str {
        match self {
            Route::Home => "nav_home",
            Route::Predict => "nav_predict",
            Route::Ops => "nav_ops",
        }
    }
}

/// Nav button rects, right-aligned along the top edge.
fn nav_rects(width: f32) -> [(Route, Rect); 3] {
    let n = Route::ALL.len() as f32;
    let x0 = width - NAV_MARGIN - n * NAV_W - (n - 1.0) * NAV_GAP;
    Route::ALL.map(|route| {
        let i = route as usize as f32;
        (route, Rect::new(x0 + i * (NAV_W + NAV_GAP), NAV_Y, NAV_W, NAV_H))
    })
}

/// What one frame produced for the host.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Draw again without waiting for input.
    pub redraw: bool,
    /// Work queued by the scene this frame.
    pub requests: Vec<Request>,
    pub route_changed: bool,
}

pub struct Shell {
    state: UiState,
    keys: KeyQueue,
    route: Route,
    home: HomeScene,
    ops: OpsScene,
    predict: PredictScene,
}

impl Shell {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            state: UiState::default(),
            keys: KeyQueue::new(),
            route: Route::default(),
            home: HomeScene,
            ops: OpsScene::new(api),
            predict: PredictScene::new(),
        }
    }

    #[inline]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Hands a finished task to the scene that asked for it.
    pub fn apply(&mut self, result: TaskResult) {
        match result {
            TaskResult::Features { generation, result } => self.ops.apply_features(generation, result),
            TaskResult::Prediction { generation, result } => {
                self.predict.apply_prediction(generation, result)
            }
        }
    }

    /// Builds one frame into `list`.
    ///
    /// Keys from `input_frame` join the queue and one of them is delivered.
    /// The scene is drawn first and the nav bar last, so the nav sits on top.
    pub fn frame(
        &mut self,
        input: &InputState,
        input_frame: &InputFrame,
        list: &mut DrawList,
        measure: &dyn TextMeasure,
        viewport: Viewport,
        theme: &Theme,
    ) -> FrameReport {
        self.keys.extend_from_frame(input_frame);
        let key = self.keys.pop();
        self.state.sample(input, input_frame, key);

        list.clear();
        let mut requests = Vec::new();
        let mut ui = UiContext::new(list, measure, viewport, theme, &mut self.state);

        clear(&mut ui);
        match self.route {
            Route::Home => self.home.draw(&mut ui),
            Route::Predict => self.predict.draw(&mut ui, &mut requests),
            Route::Ops => self.ops.draw(&mut ui, &mut requests),
        }

        let mut next = self.route;
        for (route, rect) in nav_rects(ui.width) {
            if button(&mut ui, route.nav_id(), rect, route.label()) {
                next = route;
            }
            if route == self.route {
                let accent = ui.theme.accent;
                let underline = Rect::new(rect.origin.x + 12.0, rect.origin.y + rect.size.y + 2.0, rect.size.x - 24.0, 2.0);
                ui.surface().push_solid_rect(underline, accent);
            }
        }

        let outcome = ui.finish();
        if let Err(err) = outcome.check() {
            log::warn!("{err}");
        }

        let route_changed = next != self.route;
        if route_changed {
            log::info!("route {} -> {}", self.route.label(), next.label());
            self.route = next;
        }

        FrameReport {
            redraw: outcome.redraw || route_changed || !self.keys.is_empty(),
            requests,
            route_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::coords::Vec2;
    use lumen_engine::input::{
        InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
        TextEvent,
    };
    use lumen_engine::text::FixedAdvance;

    use crate::config::BasicAuth;

    struct Host {
        shell: Shell,
        input: InputState,
        input_frame: InputFrame,
        list: DrawList,
        theme: Theme,
    }

    impl Host {
        fn new() -> Self {
            let api = ApiConfig {
                base_url: "http://localhost:8000".into(),
                basic_auth: BasicAuth::parse("ops:secret"),
            };
            Self {
                shell: Shell::new(&api),
                input: InputState::default(),
                input_frame: InputFrame::default(),
                list: DrawList::new(),
                theme: Theme::dark(),
            }
        }

        fn send(&mut self, ev: InputEvent) {
            self.input.apply_event(&mut self.input_frame, ev);
        }

        fn click(&mut self, x: f32, y: f32) {
            self.send(InputEvent::PointerMoved(Vec2::new(x, y)));
            for state in [MouseButtonState::Pressed, MouseButtonState::Released] {
                self.send(InputEvent::PointerButton(PointerButtonEvent {
                    button: MouseButton::Left,
                    state,
                    pos: Vec2::new(x, y),
                    modifiers: Modifiers::default(),
                }));
            }
        }

        fn frame(&mut self) -> FrameReport {
            let report = self.shell.frame(
                &self.input,
                &self.input_frame,
                &mut self.list,
                &FixedAdvance::default(),
                Viewport::new(1100.0, 720.0),
                &self.theme,
            );
            self.input_frame.clear();
            report
        }

        fn has_text(&self, s: &str) -> bool {
            self.list.items().iter().filter_map(|i| i.cmd.as_text()).any(|t| t.text == s)
        }

        fn nav(&mut self, route: Route) -> FrameReport {
            let (_, rect) = nav_rects(1100.0)[route as usize];
            self.click(rect.origin.x + 10.0, rect.origin.y + 10.0);
            self.frame()
        }
    }

    // ── nav ───────────────────────────────────────────────────────────────

    #[test]
    fn nav_is_right_aligned() {
        let rects = nav_rects(1100.0);
        assert_eq!(rects[0].1, Rect::new(1100.0 - 24.0 - 3.0 * 96.0 - 16.0, 18.0, 96.0, 32.0));
        let last = rects[2].1;
        assert_eq!(last.origin.x + last.size.x, 1100.0 - 24.0);
    }

    #[test]
    fn starts_home() {
        let mut h = Host::new();
        let report = h.frame();
        assert_eq!(h.shell.route(), Route::Home);
        assert!(!report.redraw);
        assert!(h.has_text("L-Nutra Predictor"));
        assert!(h.has_text("Predict"));
    }

    #[test]
    fn nav_click_switches_route_and_asks_for_redraw() {
        let mut h = Host::new();
        h.frame();
        let report = h.nav(Route::Predict);
        assert!(report.route_changed);
        assert!(report.redraw);
        assert_eq!(h.shell.route(), Route::Predict);

        let report = h.frame();
        assert!(!report.route_changed);
        assert!(h.has_text("Prediction"));
    }

    #[test]
    fn ops_fetches_features_on_first_view() {
        let mut h = Host::new();
        h.nav(Route::Ops);
        let report = h.frame();
        assert_eq!(report.requests, vec![Request::Features { generation: 1 }]);
        assert!(h.has_text("Has Basic: yes"));

        let report = h.frame();
        assert!(report.requests.is_empty());

        h.shell.apply(TaskResult::Features {
            generation: 1,
            result: Ok(vec!["age_years".into(), "bmi".into()]),
        });
        h.frame();
        assert!(h.has_text("bmi"));
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn typed_burst_drains_one_key_per_frame() {
        let mut h = Host::new();
        h.nav(Route::Predict);
        // Focus age_years (second field) and clear it.
        h.click(30.0, 80.0 + 54.0 + 5.0);
        h.frame();
        for _ in 0..2 {
            h.send(InputEvent::Key {
                key: Key::Backspace,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                repeat: false,
            });
        }
        h.send(InputEvent::Text(TextEvent { text: "63".into() }));

        let mut frames = 0;
        while h.frame().redraw {
            frames += 1;
            assert!(frames < 10, "queue never drained");
        }
        assert_eq!(frames, 3);

        h.frame();
        let field = h
            .list
            .items()
            .iter()
            .filter_map(|i| i.cmd.as_text())
            .find(|t| t.origin == Vec2::new(34.0, 80.0 + 54.0 + 17.0))
            .map(|t| t.text.clone());
        assert_eq!(field.as_deref(), Some("63"));
    }

    #[test]
    fn predict_click_emits_request_with_form_values() {
        let mut h = Host::new();
        h.nav(Route::Predict);
        h.click(30.0, 80.0 + 9.0 * 54.0 + 5.0);
        let report = h.frame();
        match report.requests.as_slice() {
            [Request::Predict { generation: 1, features }] => {
                assert_eq!(features.age_years, 40.0);
                assert_eq!(features.sex, "M");
            }
            other => panic!("unexpected requests {other:?}"),
        }
    }
}
