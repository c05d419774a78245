//! Clickable axis labels drawn with egui over the 3D pass.
//!
//! Each label is an egui area pinned to the screen projection of its world
//! anchor. A primary press on a label is reported back as the label's target
//! string; the app decodes it and applies it to the scene after the frame.
//! Presses that egui claims are not forwarded to the camera, so clicking a
//! label never starts an orbit drag.

use glam::Vec3;
use labgrid_model::AxisLabel;
use winit::window::Window;

use crate::camera::OrbitCamera;

/// Label background, black at 60% alpha.
const LABEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 153);
const LABEL_TEXT_SIZE: f32 = 12.0;

/// egui state and painter for the label layer.
pub struct LabelOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    painter: egui_wgpu::Renderer,
}

/// What one overlay frame produced.
pub struct OverlayFrame {
    /// Targets of labels pressed this frame, in draw order
    pub pressed: Vec<String>,
    /// Buffer uploads to submit before the frame's main command buffer
    pub command_buffers: Vec<wgpu::CommandBuffer>,
}

impl LabelOverlay {
    /// Create the overlay for a surface of the given format.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let painter = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            state,
            painter,
        }
    }

    /// Feed a window event to egui.
    ///
    /// Returns true if egui wants exclusive use of this event.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Lay out the labels, paint them into `view` and collect presses.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        camera: &OrbitCamera,
        labels: &[AxisLabel],
    ) -> OverlayFrame {
        let size = window.inner_size();
        let viewport = [size.width as f32, size.height as f32];
        let pixels_per_point = egui_winit::pixels_per_point(&self.ctx, window);

        let raw_input = self.state.take_egui_input(window);
        let mut pressed = Vec::new();
        let full_output = self.ctx.run(raw_input, |ctx| {
            for label in labels {
                let Some([x, y]) = camera.project(Vec3::from(label.anchor), viewport) else {
                    continue;
                };
                let pos = egui::pos2(x / pixels_per_point, y / pixels_per_point);

                egui::Area::new(egui::Id::new(("axis-label", label.axis.key(), label.index)))
                    .fixed_pos(pos)
                    .pivot(egui::Align2::CENTER_CENTER)
                    .order(egui::Order::Foreground)
                    .show(ctx, |ui| {
                        let text = egui::RichText::new(&label.text)
                            .color(egui::Color32::WHITE)
                            .size(LABEL_TEXT_SIZE);
                        let response = ui
                            .add(egui::Button::new(text).fill(LABEL_FILL))
                            .on_hover_cursor(egui::CursorIcon::PointingHand);

                        // Fire on pointer-down, not on release
                        if response.hovered() && ui.input(|i| i.pointer.primary_pressed()) {
                            pressed.push(label.target());
                        }
                    });
            }
        });
        // egui may run the UI closure more than once per frame
        pressed.dedup();

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.painter.update_texture(device, queue, *id, delta);
        }
        let command_buffers = self
            .painter
            .update_buffers(device, queue, encoder, &paint_jobs, &screen);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Label Overlay Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.painter.render(&mut pass, &paint_jobs, &screen);
        }

        for id in &full_output.textures_delta.free {
            self.painter.free_texture(id);
        }

        OverlayFrame {
            pressed,
            command_buffers,
        }
    }
}
