use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{AcquireAction, WgpuPort};
use crate::input::InputState;
use crate::lifecycle::ResourceLifecycle;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the window size as `(width, height)` in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by the GPU port
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub lifecycle: &'a mut ResourceLifecycle<WgpuPort<'w>>,
    pub input: &'a InputState,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`]
    /// and [`RenderTarget`], then presents the frame.
    ///
    /// Walks the resource tiers forward first, so the first frame after
    /// startup or after a device loss transparently rebuilds what it needs.
    /// Recoverable acquisition failures skip the frame; the tiers are
    /// repaired and the next redraw tries again.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let (width, height) = self.window.physical_size();
        if width == 0 || height == 0 {
            // Minimized; nothing to draw.
            return AppControl::Continue;
        }

        if let Err(err) = self.lifecycle.ensure_ready(width, height) {
            log::error!("failed to prepare GPU resources: {err:#}");
            return AppControl::Exit;
        }

        let generation = self.lifecycle.device_generation();

        let Some((device, surface)) = self.lifecycle.device_and_surface_mut() else {
            return AppControl::Continue;
        };

        let mut frame = match surface.acquire(device) {
            Ok(f) => f,
            Err(AcquireAction::RecoverDevice) => {
                log::warn!("device lost at frame acquisition; recovering next frame");
                self.lifecycle.handle_device_lost();
                return AppControl::Continue;
            }
            Err(AcquireAction::ReconfigureSurface) => {
                surface.reconfigure(device);
                return AppControl::Continue;
            }
            Err(AcquireAction::SkipFrame) => {
                return AppControl::Continue;
            }
            Err(AcquireAction::Fatal) => {
                log::error!("fatal surface error; shutting down");
                return AppControl::Exit;
            }
        };

        let surface_format = surface.format();

        // Clear pass — dropped before the encoder is moved into submit().
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("grum clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            device.device(),
            device.queue(),
            surface_format,
            Viewport::new(width as f32, height as f32),
            generation,
        );

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        device.submit(frame);

        AppControl::Continue
    }
}
