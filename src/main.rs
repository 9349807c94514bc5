pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod persist;
pub mod render;
pub mod rules;
pub mod sim;
pub mod state;
pub mod ui;

use crate::config::Config;
use crate::state::State;

use clap::Parser;
use winit::{
    event::{Event, WindowEvent, MouseScrollDelta},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};
use std::sync::Arc;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, app_config: Config) -> anyhow::Result<()> {
    let mut state = match State::new(window, &app_config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Initialization failed: {:#}", e);
            return Err(e);
        }
    };

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // egui sees every window event first
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                if response.repaint {
                    state.window.request_redraw();
                }

                // Resize and redraw must reach the simulation even if egui uses them
                let consumed_by_egui = response.consumed
                    && !matches!(event, WindowEvent::Resized(_) | WindowEvent::RedrawRequested);

                // Only presses can be taken by egui; releases always count
                if let WindowEvent::MouseInput { state: element_state, button, .. } = event {
                    input::handle_mouse_input(&mut state, *button, *element_state, response.consumed);
                    return;
                }

                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        input::handle_key(&mut state, &key_event.logical_key, key_event.state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll_amount = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => (pos.y / 20.0) as f32,
                        };
                        if scroll_amount != 0.0 {
                            input::handle_scroll(&mut state, scroll_amount);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        // Edits first, then one simulation frame and the grid render
                        input::apply_held_buttons(&mut state);
                        let game_render_result = state.update_and_render();

                        let output_frame = match game_render_result {
                            Ok(frame) => frame,
                            Err(e) => {
                                // Lost was already handled by a reconfigure in update_and_render
                                log::warn!("Skipping frame due to surface {:?}", e);
                                state.window.request_redraw();
                                return;
                            }
                        };

                        // Overlay
                        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

                        let raw_input = state.egui_winit_state.take_egui_input(&state.window);
                        state.egui_ctx.begin_frame(raw_input);
                        ui::draw(&state.egui_ctx, &mut state.sim, &mut state.overlay);
                        let full_output = state.egui_ctx.end_frame();

                        let paint_jobs = state.egui_ctx.tessellate(full_output.shapes, state.window.scale_factor() as f32);
                        let screen_descriptor = egui_wgpu::ScreenDescriptor {
                            size_in_pixels: [state.config.width, state.config.height],
                            pixels_per_point: state.window.scale_factor() as f32,
                        };

                        let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui Encoder"),
                        });
                        for (id, image_delta) in &full_output.textures_delta.set {
                            state.egui_renderer.update_texture(&state.device, &state.queue, *id, image_delta);
                        }
                        let egui_commands = state.egui_renderer.update_buffers(
                            &state.device,
                            &state.queue,
                            &mut encoder,
                            &paint_jobs,
                            &screen_descriptor,
                        );
                        state.egui_winit_state.handle_platform_output(
                            &state.window,
                            full_output.platform_output,
                        );

                        {
                            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui Render Pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &output_view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                timestamp_writes: None,
                                occlusion_query_set: None,
                            });

                            state.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
                        }

                        for id in &full_output.textures_delta.free {
                            state.egui_renderer.free_texture(id);
                        }

                        state.queue.submit(
                            egui_commands.into_iter().chain(std::iter::once(encoder.finish())),
                        );
                        output_frame.present();
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
            }
            _ => ()
        }
    })?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let app_config = Config::parse();
    let event_loop = EventLoop::new()?;

    let (window_width, window_height) = app_config.window_size();
    let initial_size = winit::dpi::LogicalSize::new(window_width as f64, window_height as f64);

    let window = Arc::new(winit::window::WindowBuilder::new()
        .with_title("Game of Life")
        .with_inner_size(initial_size)
        .with_resizable(false)
        .build(&event_loop)?);

    log::info!(
        "Grid {}x{} at {}px per cell",
        app_config.width, app_config.height, app_config.cell_size
    );

    pollster::block_on(run(event_loop, window, app_config))
}
