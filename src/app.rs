use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use winit::window::Window;

use crate::{
    exit::ExitPolicy,
    renderer::Renderer,
    scene::{Scene, PARTICLE_COUNT, SPHERE_SEGMENTS},
    window::{HasSize, Size},
};

pub struct App {
    renderer: Renderer,
    // Must outlive `renderer`, whose surface was created from it.
    window: Window,
    scene: Scene,
    exit_policy: ExitPolicy,
    started_at: Instant,
    last_tick_at: Instant,
}

impl App {
    pub fn new(window: Window) -> Result<Self> {
        let size = window.size();
        let scene = Scene::new(size.aspect_ratio())?;
        info!(
            "Scene: {} particles, spheres of radius {} and {} with {} segments, {}x{} viewport",
            PARTICLE_COUNT,
            scene.spheres[0].mesh.radius(),
            scene.spheres[1].mesh.radius(),
            SPHERE_SEGMENTS,
            size.width,
            size.height,
        );

        let renderer = Renderer::new(&window, &scene)?;
        window.set_cursor_visible(false);

        let now = Instant::now();
        Ok(Self {
            renderer,
            window,
            scene,
            exit_policy: ExitPolicy::new(),
            started_at: now,
            last_tick_at: now,
        })
    }

    pub fn on_resize(&mut self, size: impl Into<Size>) {
        let size = size.into();
        if size.is_empty() {
            return;
        }
        self.scene.camera.aspect_ratio = size.aspect_ratio();
        self.renderer.resize(size);
    }

    pub fn on_key(&mut self) -> bool {
        self.exit_policy.on_key()
    }

    pub fn on_mouse_button(&mut self) -> bool {
        self.exit_policy.on_mouse_button()
    }

    pub fn on_cursor_moved(&mut self, position: (f64, f64)) -> bool {
        self.exit_policy.on_cursor_moved(position)
    }

    /// Runs one frame: simulation first, then every draw reads the updated state.
    pub fn tick(&mut self) -> Result<()> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.started_at).as_secs_f32();
        let delta = now.duration_since(self.last_tick_at).as_secs_f32();
        self.last_tick_at = now;

        self.scene.advance(elapsed, delta);
        let camera = &self.scene.camera;
        debug!(
            "t={:.3} dt={:.4} camera={:?} yaw={:.1} pitch={:.1}",
            elapsed,
            delta,
            camera.position(),
            camera.yaw(),
            camera.pitch()
        );

        self.renderer.render(&self.scene)
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
