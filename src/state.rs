use crate::config::Config;
use crate::input::PointerButtons;
use crate::render::{
    RenderParams, create_grid_buffer, create_render_bind_group, create_render_bind_group_layout,
    create_render_pipeline, pack_cells,
};
use crate::sim::Simulation;
use crate::ui::Overlay;
use anyhow::{anyhow, Context};
use winit::{
    dpi::PhysicalPosition,
    window::Window,
};
use std::sync::Arc;

use egui_winit::State as EguiWinitState;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui::Context as EguiContext;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub sim: Simulation,
    pub cell_size: u32, // Logical pixels per cell edge

    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group: wgpu::BindGroup,
    pub render_param_buffer: wgpu::Buffer,
    pub grid_buffer: wgpu::Buffer,
    pub cell_upload: Vec<u32>, // Reused every frame for the grid upload

    pub buttons: PointerButtons,
    pub cursor_pos: Option<PhysicalPosition<f64>>,

    // Overlay
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub overlay: Overlay,
}

impl State {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| anyhow!("Failed to find an appropriate adapter"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("Failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Vsync paces the frame loop, and with it the generation rate
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format.into()],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Simulation
        let mut sim = Simulation::new(
            app_config.width as usize,
            app_config.height as usize,
            app_config.speed,
        );
        if let Some(path) = &app_config.load {
            if let Err(e) = sim.load(path) {
                log::warn!("Could not load {}: {}", path.display(), e);
            }
        }
        if let Some(pattern) = app_config.pattern {
            sim.seed(pattern)?;
        }

        // Render Resources
        let grid_buffer = create_grid_buffer(&device, sim.grid().width(), sim.grid().height());
        let render_param_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Render Parameters"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_bind_group = create_render_bind_group(
            &device, &render_bind_group_layout, &render_param_buffer, &grid_buffer
        );
        let render_pipeline = create_render_pipeline(&device, &render_bind_group_layout, config.format);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully.");

        let state = Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            sim,
            cell_size: app_config.cell_size,
            render_pipeline,
            render_bind_group,
            render_param_buffer,
            grid_buffer,
            cell_upload: Vec::new(),
            buttons: PointerButtons::default(),
            cursor_pos: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            overlay: Overlay::default(),
        };
        state.write_render_params();

        Ok(state)
    }

    /// Physical pixels per cell edge at the window's current scale factor.
    pub fn pixels_per_cell(&self) -> f64 {
        self.cell_size as f64 * self.window.scale_factor()
    }

    fn write_render_params(&self) {
        self.queue.write_buffer(&self.render_param_buffer, 0, bytemuck::bytes_of(&RenderParams {
            grid_width: self.sim.grid().width() as u32,
            grid_height: self.sim.grid().height() as u32,
            cell_size: self.pixels_per_cell() as f32,
            _padding: 0.0,
        }));
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            // The grid is fixed-size; only the scale factor may have changed
            self.write_render_params();

            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Run one simulation frame and draw the grid. The frame is returned
    /// unpresented so the overlay can be drawn over it.
    pub fn update_and_render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.sim.frame();

        pack_cells(self.sim.grid(), &mut self.cell_upload);
        self.queue.write_buffer(&self.grid_buffer, 0, bytemuck::cast_slice(&self.cell_upload));

        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment {
                        view: &output_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })
                ],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }
        self.queue.submit(Some(render_encoder.finish()));

        Ok(output_frame)
    }
}
