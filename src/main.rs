use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

mod app;
mod camera;
mod exit;
mod particles;
mod renderer;
mod scene;
mod sphere;
mod sprite;
mod window;

use app::App;

const TICK_RATE: f64 = 60.;

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new();

    let window = WindowBuilder::new()
        .with_title("Orbit Spheres")
        .with_fullscreen(Some(Fullscreen::Borderless(None)))
        .build(&event_loop)
        .context("Failed to build window")?;

    let mut app = App::new(window)?;

    let target_frame_interval = Duration::from_secs_f64(1.0 / TICK_RATE);
    let mut last_render_inst = Instant::now();

    event_loop.run(move |e, _, control_flow| {
        let exit_requested = match e {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => true,
                WindowEvent::Resized(size) => {
                    app.on_resize(size);
                    false
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    app.on_resize(*new_inner_size);
                    false
                }
                WindowEvent::KeyboardInput {
                    is_synthetic: false,
                    ..
                } => app.on_key(),
                WindowEvent::MouseInput { .. } => app.on_mouse_button(),
                WindowEvent::CursorMoved { position, .. } => {
                    app.on_cursor_moved((position.x, position.y))
                }
                _ => false,
            },
            Event::MainEventsCleared => {
                let elapsed_from_last_draw = last_render_inst.elapsed();
                if target_frame_interval > elapsed_from_last_draw {
                    let wait = target_frame_interval - elapsed_from_last_draw;
                    *control_flow = ControlFlow::WaitUntil(Instant::now() + wait);
                    return;
                }
                *control_flow = ControlFlow::Poll;
                app.request_redraw();
                false
            }
            Event::RedrawRequested(..) => {
                last_render_inst = Instant::now();
                match app.tick() {
                    Ok(()) => false,
                    Err(e) => {
                        error!("{:#}", e);
                        true
                    }
                }
            }
            _ => false,
        };

        if exit_requested {
            info!("Exiting");
            *control_flow = ControlFlow::Exit;
        }
    });
}
