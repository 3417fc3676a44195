use std::collections::HashSet;
use std::error::Error;

use log::{debug, error};
use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::{Surface, SurfaceSize};

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: Option<bool>,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
}

/// What the loop should do after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    /// Nothing visible changed.
    Continue,
    Redraw,
    Exit,
}

/// A keyboard-driven game hosted in a window.
///
/// The loop is event driven: it sleeps until input arrives, hands mapped actions to
/// `update_state`, and only redraws when asked to (or when the window needs it).
pub trait GameApp {
    type State;
    type Action: Copy;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn map_key(&self, state: &Self::State, key: VirtualKeyCode) -> Option<Self::Action>;

    fn update_state(&mut self, state: &mut Self::State, action: Self::Action) -> AppFlow;

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);

    /// Runs once before the loop exits, whether by action or by closing the window.
    fn on_exit(&mut self, _state: &mut Self::State) {}
}

/// Turns raw key events into one press per physical key-down.
///
/// OS key-repeat delivers extra `Pressed` events while a key is held; those are dropped so a
/// held arrow key moves exactly once.
#[derive(Debug, Default)]
pub struct KeyLatch {
    held: HashSet<VirtualKeyCode>,
}

impl KeyLatch {
    /// Returns the key if this event starts a new press.
    pub fn on_key(&mut self, key: VirtualKeyCode, state: ElementState) -> Option<VirtualKeyCode> {
        match state {
            ElementState::Pressed => self.held.insert(key).then_some(key),
            ElementState::Released => {
                self.held.remove(&key);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

fn initial_window_size(config: &AppConfig, monitor: Option<PhysicalSize<u32>>) -> PhysicalSize<u32> {
    match monitor.filter(|_| config.clamp_to_monitor) {
        Some(monitor) => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        None => config.desired_size,
    }
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let monitor_size = event_loop.primary_monitor().map(|m| m.size());
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(initial_window_size(&config, monitor_size))
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));

    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let mut pixels_builder = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        pixels_builder = pixels_builder.enable_vsync(vsync);
    }
    let pixels = pixels_builder.build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext { window, renderer };
    let mut state = game.init_state(&mut ctx);
    let mut keys = KeyLatch::default();
    let mut exited = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        if exited {
            *control_flow = ControlFlow::Exit;
            return;
        }

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    game.on_exit(&mut state);
                    exited = true;
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Focused(false) => keys.clear(),
                WindowEvent::Resized(size) => {
                    if let Err(err) = ctx.renderer.resize(SurfaceSize::new(size.width, size.height)) {
                        error!("resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: key_state,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    let Some(key) = keys.on_key(key, key_state) else {
                        return;
                    };
                    let Some(action) = game.map_key(&state, key) else {
                        debug!("unmapped key: {key:?}");
                        return;
                    };
                    match game.update_state(&mut state, action) {
                        AppFlow::Continue => {}
                        AppFlow::Redraw => ctx.window.request_redraw(),
                        AppFlow::Exit => {
                            game.on_exit(&mut state);
                            exited = true;
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
                if let Err(err) = ctx.renderer.present() {
                    error!("present failed: {err}");
                }
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
