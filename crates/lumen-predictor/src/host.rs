use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::render::Renderer;
use lumen_engine::scene::DrawList;
use lumen_engine::text::{FixedAdvance, FontSystem, TextMeasure};
use lumen_ui::Theme;

use crate::shell::Shell;
use crate::tasks::Tasks;

const TITLE: &str = "L-Nutra Predictor";

/// Connects the shell to the engine: builds a draw list per frame, renders it
/// and routes background results back into the scenes.
pub struct PredictorApp {
    shell: Shell,
    theme: Theme,
    fonts: FontSystem,
    /// Used for layout when no font could be loaded.
    fallback: FixedAdvance,
    list: DrawList,
    renderer: Renderer,
    tasks: Tasks,
}

impl PredictorApp {
    pub fn new(shell: Shell, theme: Theme, fonts: FontSystem, tasks: Tasks) -> Self {
        Self {
            shell,
            theme,
            fonts,
            fallback: FixedAdvance::default(),
            list: DrawList::new(),
            renderer: Renderer::new(),
            tasks,
        }
    }
}

impl App for PredictorApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let measure: &dyn TextMeasure =
            if self.fonts.is_empty() { &self.fallback } else { &self.fonts };

        let report = self.shell.frame(
            ctx.input,
            ctx.input_frame,
            &mut self.list,
            measure,
            ctx.window.viewport(),
            &self.theme,
        );

        for request in report.requests {
            self.tasks.spawn(request);
        }
        if report.route_changed {
            ctx.runtime.set_title(format!("{TITLE} · {}", self.shell.route().label()));
        }

        let renderer = &mut self.renderer;
        let list = &self.list;
        let fonts = &self.fonts;
        let mut atlas_full = false;
        let control = ctx.render(self.theme.bg, |rctx, target| {
            atlas_full = renderer.render(rctx, target, list, fonts);
        });

        if report.redraw || atlas_full {
            ctx.request_redraw();
        }
        control
    }

    fn on_wake(&mut self) -> bool {
        let mut any = false;
        for result in self.tasks.drain() {
            self.shell.apply(result);
            any = true;
        }
        any
    }
}
