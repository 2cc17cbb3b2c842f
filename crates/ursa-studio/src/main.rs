//! Ursa studio: the rotating bear in a window.
//!
//! Drag to turn the bear, space to resume the spin, escape to quit.
//! `URSA_BACKGROUND=#rrggbb` overrides the window colour.

use anyhow::{Context, Result};
use winit::event::WindowEvent;
use winit::window::WindowId;

use ursa_engine::core::{App, AppControl, FrameCtx};
use ursa_engine::device::GpuInit;
use ursa_engine::input::{InputEvent, Key, KeyState};
use ursa_engine::logging::{LoggingConfig, init_logging};
use ursa_engine::render::{PixmapCanvas, PixmapPresenter};
use ursa_engine::window::{Runtime, RuntimeConfig};
use ursa_scene::bear::{self, Palette};
use ursa_scene::{AutoplayConfig, CanvasSet, Color, Scene, Stage, StageConfig};

const FPS_LOG_INTERVAL: u64 = 300;

struct BearApp {
    scene: Scene,
    stage_config: StageConfig,
    canvases: Option<CanvasSet<PixmapCanvas>>,
    presenter: PixmapPresenter,
    background: Color,
}

impl BearApp {
    fn new(background: Color) -> Self {
        let stage_config = StageConfig::default();
        let initial = RuntimeConfig::default().initial_size;
        let stage = Stage::fit(stage_config, initial.width, initial.height, 1.0);
        let scene = Scene::new(bear::build(&Palette::default()), AutoplayConfig::default(), stage);
        Self {
            scene,
            stage_config,
            canvases: None,
            presenter: PixmapPresenter::new(),
            background,
        }
    }

    /// Refits the stage to the window and keeps the canvases at its size.
    fn fit_stage(&mut self, logical: (f64, f64), scale_factor: f64) -> Result<()> {
        let stage = Stage::fit(self.stage_config, logical.0, logical.1, scale_factor);
        if stage != *self.scene.stage() {
            log::debug!("stage zoom {}", stage.zoom());
            self.scene.set_stage(stage);
        }

        let (w, h) = stage.canvas_size();
        match &mut self.canvases {
            Some(c) => {
                c.main.resize(w, h)?;
                c.base.resize(w, h)?;
                c.overlay.resize(w, h)?;
            }
            None => {
                self.canvases = Some(CanvasSet::new(
                    PixmapCanvas::new(w, h)?,
                    PixmapCanvas::new(w, h)?,
                    PixmapCanvas::new(w, h)?,
                ));
            }
        }
        Ok(())
    }
}

impl App for BearApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::CloseRequested = event {
            log::info!("window closed");
        }
        AppControl::Continue
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match *event {
            InputEvent::Pointer(pointer) => {
                self.scene.handle_pointer(pointer);
            }
            InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: false } => {
                self.scene.resume_autoplay();
            }
            InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. } => {
                return AppControl::Exit;
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Err(e) = self.fit_stage(ctx.window.logical_size(), ctx.window.scale_factor()) {
            log::error!("failed to size canvases: {e:#}");
            ctx.runtime.exit();
            return AppControl::Continue;
        }

        self.scene.update();
        let Some(canvases) = self.canvases.as_mut() else { return AppControl::Continue };
        self.scene.render(canvases);

        if ctx.time.frame_index % FPS_LOG_INTERVAL == 0 {
            log::debug!("frame {} at {:.1} fps", ctx.time.frame_index, ctx.time.fps);
        }

        let presenter = &mut self.presenter;
        let main = &canvases.main;
        ctx.render(self.background, |rctx, target| presenter.render(rctx, target, main))
    }
}

fn background_from_env() -> Color {
    match std::env::var("URSA_BACKGROUND") {
        Ok(hex) => Color::from_hex(&hex).unwrap_or_else(|e| {
            log::warn!("ignoring URSA_BACKGROUND: {e}");
            Color::WHITE
        }),
        Err(_) => Color::WHITE,
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = BearApp::new(background_from_env());
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app).context("ursa studio failed")
}
