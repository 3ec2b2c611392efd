use anyhow::{Context, Result};
use log::{info, warn};
use pollster::FutureExt as _;

use crate::{
    scene::Scene,
    window::{HasSize, Size},
};

mod particles;
mod sphere;

use particles::{ParticleRenderer, ParticleRendererBuilder};
use sphere::SphereRenderer;

/// Owns the GPU device and every resource the display needs.
///
/// Resources are created once in [`Renderer::new`] and released when the renderer drops.
pub struct Renderer {
    surface: wgpu::Surface,
    surface_format: wgpu::TextureFormat,
    size: Size,
    device: wgpu::Device,
    queue: wgpu::Queue,
    sphere_renderer: SphereRenderer,
    particle_renderer: ParticleRenderer,
}

impl Renderer {
    pub fn new(window: &winit::window::Window, scene: &Scene) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::PRIMARY);
        let surface = unsafe { instance.create_surface(window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .block_on()
            .context("No adapter found")?;
        info!("Using adapter {:?}", adapter.get_info());

        let surface_format = surface
            .get_preferred_format(&adapter)
            .context("Surface is incompatible with the adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .block_on()
            .context("No device found")?;

        let size = window.size();
        configure_surface(&surface, &device, surface_format, size);

        let sphere_renderer = SphereRenderer::new(&device, surface_format, scene);
        let particle_renderer = ParticleRendererBuilder::new(scene)
            .color_target_format(surface_format)
            .viewport(size)
            .build(&device, &queue)?;

        Ok(Self {
            surface,
            surface_format,
            size,
            device,
            queue,
            sphere_renderer,
            particle_renderer,
        })
    }

    pub fn resize(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        self.size = size;
        configure_surface(&self.surface, &self.device, self.surface_format, size);
    }

    /// Uploads this tick's transforms and particles, then draws the spheres followed by
    /// the particle cloud.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        self.sphere_renderer.update(&self.queue, scene);
        self.particle_renderer.update(&self.queue, scene, self.size);

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("{}, reconfiguring surface", e);
                configure_surface(&self.surface, &self.device, self.surface_format, self.size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to get next surface texture"),
        };

        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Command Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                }],
                depth_stencil_attachment: None,
            });
            self.sphere_renderer.draw(&mut rpass);
            self.particle_renderer.draw(&mut rpass);
        }

        self.queue.submit(Some(encoder.finish()));

        frame.present();

        Ok(())
    }
}

fn configure_surface(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: Size,
) {
    surface.configure(
        device,
        &wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
        },
    );
}
