use std::rc::Rc;

use anyhow::{Context, Result};
use winit::window::Window;

use crate::lifecycle::{GpuPort, SurfaceStatus};

use super::frame::SurfaceFrame;
use super::surface::GpuSurface;

/// Device-tier bundle: adapter, logical device, command queue.
///
/// Created and released by the lifecycle manager; a fresh bundle is built
/// after every device loss.
pub struct GpuDevice {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    /// True when the hardware adapter request failed and a software
    /// (fallback) adapter is in use.
    software: bool,
}

impl GpuDevice {
    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn is_software(&self) -> bool {
        self.software
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: SurfaceFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }
}

/// Factory-tier state: the wgpu instance and the window-bound surface handle.
///
/// The unconfigured `wgpu::Surface` is a window binding, not a swap chain;
/// the configured swap chain (the surface tier) comes and goes with
/// `GpuSurface` while this handle lives for the window's lifetime.
pub struct WgpuPort<'w> {
    instance: wgpu::Instance,
    surface: Rc<wgpu::Surface<'w>>,
}

impl<'w> WgpuPort<'w> {
    pub fn new(window: &'w Window) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        Ok(Self {
            instance,
            surface: Rc::new(surface),
        })
    }

    /// Adapter/device acquisition is asynchronous under wgpu; this blocks on
    /// the single runtime thread.
    fn request_device(&self) -> Result<GpuDevice> {
        pollster::block_on(async {
            let (adapter, software) = match self
                .instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&self.surface),
                    force_fallback_adapter: false,
                })
                .await
            {
                Ok(adapter) => (adapter, false),
                Err(err) => {
                    // Fall back to a software adapter before giving up.
                    log::warn!("hardware adapter unavailable ({err}); trying software fallback");
                    let adapter = self
                        .instance
                        .request_adapter(&wgpu::RequestAdapterOptions {
                            power_preference: wgpu::PowerPreference::HighPerformance,
                            compatible_surface: Some(&self.surface),
                            force_fallback_adapter: true,
                        })
                        .await
                        .context("failed to find any GPU adapter (hardware or software)")?;
                    (adapter, true)
                }
            };

            let (device, queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("grum-engine device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    experimental_features: wgpu::ExperimentalFeatures::disabled(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                })
                .await
                .context("failed to create wgpu device/queue")?;

            Ok(GpuDevice {
                adapter,
                device,
                queue,
                software,
            })
        })
    }
}

impl<'w> GpuPort for WgpuPort<'w> {
    type Device = GpuDevice;
    type Surface = GpuSurface<'w>;

    fn create_device(&mut self) -> Result<GpuDevice> {
        let gpu = self.request_device()?;
        if gpu.is_software() {
            log::info!("rendering on a software adapter");
        }
        Ok(gpu)
    }

    fn create_surface(
        &mut self,
        device: &GpuDevice,
        width: u32,
        height: u32,
    ) -> Result<GpuSurface<'w>> {
        GpuSurface::new(self.surface.clone(), device, width, height)
    }

    fn resize_surface(
        &mut self,
        device: &GpuDevice,
        surface: &mut GpuSurface<'w>,
        width: u32,
        height: u32,
    ) -> SurfaceStatus {
        surface.resize(device, width, height)
    }
}
