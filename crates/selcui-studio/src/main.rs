//! Viewer for the selection overlay: replays wire messages from a script
//! and orbits a camera around the result.

mod camera;
mod script;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use selcui_engine::config::CuiConfig;
use selcui_engine::coords::Vector3;
use selcui_engine::core::{App, AppControl, FrameCtx};
use selcui_engine::device::GpuInit;
use selcui_engine::event::{channel, Dispatcher, EventQueue};
use selcui_engine::frame::{FrameInfo, FrameOutcome, WorldRenderer};
use selcui_engine::logging::{init_logging, LoggingConfig};
use selcui_engine::paint::Color;
use selcui_engine::region::Region;
use selcui_engine::render::gpu::{GpuOverlay, LinePipelineProvider, OverlayCaps, RibbonPipelineProvider, SharedOverlay};
use selcui_engine::render::{HeadlessPipelineProvider, RecordingTarget, TypeSet};
use selcui_engine::selection::{Selections, Slot};
use selcui_engine::session::{self, HandshakeScheduler, Identity, Outgoing};
use selcui_engine::time::TickClock;
use selcui_engine::window::{Runtime, RuntimeConfig};

use camera::OrbitCamera;
use script::Script;

fn main() -> Result<()> {
    let debug = std::env::var_os("SELCUI_DEBUG").is_some();
    init_logging(LoggingConfig { debug_events: debug, ..LoggingConfig::default() });

    let script = match std::env::args().nth(1) {
        Some(path) => Script::load(&path)?,
        None => Script::demo(),
    };

    let (tx, queue) = channel();
    let _replay = script::spawn_replay(tx, script)?;

    let config = RuntimeConfig { title: "selcui studio".into(), ..RuntimeConfig::default() };
    Runtime::run(config, GpuInit::default(), Studio::new(queue, CuiConfig { debug, ..CuiConfig::default() }))
}

struct Studio {
    queue: EventQueue,
    dispatcher: Dispatcher,
    selections: Selections,
    session: HandshakeScheduler,
    identity: Identity,
    joined: bool,
    ticks: TickClock,

    camera: OrbitCamera,
    drag: Option<(f64, f64)>,
    dragging: bool,

    renderer: Option<(WorldRenderer, SharedOverlay)>,
    headless: RecordingTarget,
    status: String,
}

impl Studio {
    fn new(queue: EventQueue, config: CuiConfig) -> Self {
        Self {
            queue,
            dispatcher: Dispatcher::new(),
            session: HandshakeScheduler::new(config.promiscuous),
            selections: Selections::new(config),
            identity: Identity { world: Some(1), player: Some(1) },
            joined: false,
            ticks: TickClock::new(),
            camera: OrbitCamera::default(),
            drag: None,
            dragging: false,
            renderer: None,
            headless: RecordingTarget::new(TypeSet::RIBBON),
            status: String::new(),
        }
    }

    fn send(&self, out: Vec<Outgoing>) {
        for o in out {
            match o {
                Outgoing::Handshake(payload) => log::info!("-> handshake `{}`", payload),
                Outgoing::Command(cmd) => log::info!("-> command `{}`", cmd),
            }
        }
    }

    fn on_key(&mut self, key: KeyCode) -> AppControl {
        match key {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::KeyB => {
                let shown = self.selections.toggle_chunk_borders();
                log::info!("chunk borders {}", if shown { "on" } else { "off" });
            }
            KeyCode::KeyC => {
                let out = session::clear_key(&mut self.selections);
                self.send(vec![out]);
            }
            KeyCode::KeyW => {
                // Pretend the player changed worlds.
                self.identity.world = self.identity.world.map(|w| w + 1);
            }
            KeyCode::KeyF => {
                if let Some(p) = focus_point(&self.selections) {
                    self.camera.target = p;
                }
            }
            _ => {}
        }
        AppControl::Continue
    }
}

/// GPU backends first, recording fallback last.
fn build_renderer(device: &wgpu::Device, headless: &RecordingTarget) -> (WorldRenderer, SharedOverlay) {
    let overlay: SharedOverlay = Rc::new(RefCell::new(GpuOverlay::new(OverlayCaps::from_device(device))));
    let renderer = WorldRenderer::new(vec![
        Box::new(RibbonPipelineProvider::new(overlay.clone())),
        Box::new(LinePipelineProvider::new(overlay.clone())),
        Box::new(HeadlessPipelineProvider::new(headless.clone())),
    ]);
    (renderer, overlay)
}

impl App for Studio {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed && !event.repeat => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    return self.on_key(code);
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.dragging = *state == ElementState::Pressed;
                if !self.dragging {
                    self.drag = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let now = (position.x, position.y);
                if self.dragging {
                    if let Some((x, y)) = self.drag {
                        self.camera.orbit((now.0 - x) as f32, (now.1 - y) as f32);
                    }
                    self.drag = Some(now);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                };
                self.camera.zoom(steps);
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.joined {
            self.joined = true;
            let out = self.session.on_join();
            self.send(out);
        }

        let step = self.ticks.advance(ctx.time.dt);
        for _ in 0..step.ticks {
            let out = self.session.tick(self.identity, &mut self.selections);
            self.send(out);
        }
        self.dispatcher.pump(&self.queue, &mut self.selections);

        self.headless.clear();
        let frame = FrameInfo::world(self.camera.eye(), step.partial);
        let headless = &self.headless;
        let (renderer, overlay) = self
            .renderer
            .get_or_insert_with(|| build_renderer(ctx.gpu.device(), headless));
        overlay.borrow_mut().clear();
        let outcome = renderer.render(&self.selections, frame);

        let status = match (outcome, renderer.chain().active_id()) {
            (FrameOutcome::Disabled, _) | (_, None) => "selcui studio [rendering disabled]".to_string(),
            (_, Some(id)) => format!("selcui studio [{id}]"),
        };
        if status != self.status {
            ctx.runtime.set_title(status.clone());
            self.status = status;
        }

        let view_proj = self.camera.view_proj(ctx.window.aspect());
        let overlay = overlay.clone();
        ctx.render(Color::new(0.08, 0.09, 0.11, 1.0), |rctx, target| {
            let rctx = rctx.with_view_proj(view_proj);
            overlay.borrow_mut().encode(&rctx, target);
        })
    }
}

/// Middle of the primary cuboid, if there is one.
fn focus_point(selections: &Selections) -> Option<Vector3> {
    let Some(Region::Cuboid(c)) = selections.get(Slot::Primary) else {
        return None;
    };
    let (a, b) = c.corners()?;
    Some((a.min(b) + a.max(b) + Vector3::ONE) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_on_cuboid_centre() {
        let mut sel = Selections::default();
        let mut d = Dispatcher::new();
        for m in ["s|cuboid", "p|0|0|0|0", "p|1|3|3|3"] {
            d.on_message(m, &mut sel);
        }
        assert_eq!(focus_point(&sel), Some(Vector3::splat(2.0)));
    }

    #[test]
    fn no_focus_without_cuboid() {
        let mut sel = Selections::default();
        Dispatcher::new().on_message("s|cylinder", &mut sel);
        assert_eq!(focus_point(&sel), None);
    }
}
