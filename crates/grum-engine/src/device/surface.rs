use std::rc::Rc;

use anyhow::{Context, Result};

use crate::lifecycle::SurfaceStatus;

use super::error::{map_acquire_error, AcquireAction};
use super::frame::SurfaceFrame;
use super::gpu::GpuDevice;

/// Surface-tier bundle: the configured swap chain.
///
/// Invalid whenever its device tier is invalid; the lifecycle manager tears
/// both down together on device loss.
pub struct GpuSurface<'w> {
    surface: Rc<wgpu::Surface<'w>>,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> GpuSurface<'w> {
    pub(super) fn new(
        surface: Rc<wgpu::Surface<'w>>,
        device: &GpuDevice,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(device.adapter());
        let format = choose_surface_format(&caps).context("no supported surface formats")?;
        let alpha_mode = choose_alpha_mode(&caps);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(device.device(), &config);

        Ok(Self { surface, config })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigures the swap chain in place.
    ///
    /// wgpu reports device loss at frame acquisition rather than here, so
    /// the resize path itself always succeeds; a lost device shows up on the
    /// next `acquire`.
    pub fn resize(&mut self, device: &GpuDevice, width: u32, height: u32) -> SurfaceStatus {
        if width == 0 || height == 0 {
            // Minimized; keep the old swap chain until a drawable size returns.
            return SurfaceStatus::Ok;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(device.device(), &self.config);
        SurfaceStatus::Ok
    }

    /// Reapplies the current configuration (outdated-surface path).
    pub fn reconfigure(&self, device: &GpuDevice) {
        self.surface.configure(device.device(), &self.config);
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn acquire(&self, device: &GpuDevice) -> std::result::Result<SurfaceFrame, AcquireAction> {
        let surface_texture = self
            .surface
            .get_current_texture()
            .map_err(map_acquire_error)?;

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = device
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("grum frame encoder"),
            });

        Ok(SurfaceFrame {
            surface_texture,
            view,
            encoder,
        })
    }
}

pub(crate) fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    let preferred = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    for f in preferred {
        if caps.formats.contains(&f) {
            return Some(f);
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    caps.alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
