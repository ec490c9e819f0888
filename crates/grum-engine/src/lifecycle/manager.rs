use anyhow::Result;

use super::port::{GpuPort, SurfaceStatus};

/// Readiness of the managed resource tiers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    /// Only the factory tier exists.
    FactoryReady,
    /// Device tier is live, no surface yet.
    DeviceReady,
    /// Device and surface tiers are live; frames may be drawn.
    SurfaceReady,
}

/// Owns the device and surface resource tiers on top of a `GpuPort`.
///
/// The manager is the sole creator and releaser of each tier. Frames may only
/// be drawn in `SurfaceReady`; callers reach that state by calling
/// `ensure_ready` every frame before drawing — it walks forward from whatever
/// state it is in and does nothing when already there.
pub struct ResourceLifecycle<P: GpuPort> {
    port: P,
    device: Option<P::Device>,
    surface: Option<P::Surface>,
    size: (u32, u32),
    device_generation: u64,
}

impl<P: GpuPort> ResourceLifecycle<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            device: None,
            surface: None,
            size: (0, 0),
            device_generation: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        match (&self.device, &self.surface) {
            (Some(_), Some(_)) => LifecycleState::SurfaceReady,
            (Some(_), None) => LifecycleState::DeviceReady,
            _ => LifecycleState::FactoryReady,
        }
    }

    /// Monotonic counter bumped on every device-tier creation.
    ///
    /// Anything caching device-owned objects (pipelines, buffers) compares
    /// generations to know when its caches died with the device.
    pub fn device_generation(&self) -> u64 {
        self.device_generation
    }

    pub fn device(&self) -> Option<&P::Device> {
        self.device.as_ref()
    }

    /// Current surface size, `(0, 0)` before the first surface exists.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Borrows both live tiers at once for frame submission.
    pub fn device_and_surface_mut(&mut self) -> Option<(&P::Device, &mut P::Surface)> {
        match (self.device.as_ref(), self.surface.as_mut()) {
            (Some(d), Some(s)) => Some((d, s)),
            _ => None,
        }
    }

    /// Walks the tiers forward until a frame can be drawn at `width`×`height`.
    ///
    /// Idempotent: when already `SurfaceReady` at that size this does nothing.
    /// A size change resizes the surface in place; if the surface reports
    /// device loss during the resize, both lost tiers are torn down and
    /// recreated within the same call. The walk is a bounded loop rather than
    /// recursion, so recovery cannot re-enter itself.
    pub fn ensure_ready(&mut self, width: u32, height: u32) -> Result<()> {
        for _ in 0..2 {
            if self.device.is_none() {
                self.device = Some(self.port.create_device()?);
                self.device_generation += 1;
                log::info!("device tier created (generation {})", self.device_generation);
            }
            let Some(device) = self.device.as_ref() else {
                continue;
            };

            if self.surface.is_none() {
                self.surface = Some(self.port.create_surface(device, width, height)?);
                self.size = (width, height);
                return Ok(());
            }

            if self.size == (width, height) {
                return Ok(());
            }

            let Some(surface) = self.surface.as_mut() else {
                continue;
            };
            match self.port.resize_surface(device, surface, width, height) {
                SurfaceStatus::Ok => {
                    self.size = (width, height);
                    return Ok(());
                }
                SurfaceStatus::DeviceLost => {
                    log::warn!("device lost during surface resize; recreating both tiers");
                    self.handle_device_lost();
                }
            }
        }

        anyhow::bail!("device lost repeatedly while rebuilding resources")
    }

    /// Resize notification from the window system.
    ///
    /// Surface tier only, unless the resize itself reports device loss, in
    /// which case `ensure_ready` falls back to full recovery.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.state() != LifecycleState::SurfaceReady {
            return Ok(());
        }
        self.ensure_ready(width, height)
    }

    /// Tears down the device and surface tiers after a reported device loss.
    ///
    /// The factory tier survives. The next `ensure_ready` call recreates both
    /// tiers before another frame is attempted.
    pub fn handle_device_lost(&mut self) {
        // Surface depends on the device; release it first.
        self.surface = None;
        self.device = None;
    }
}

impl<P: GpuPort> Drop for ResourceLifecycle<P> {
    fn drop(&mut self) {
        // Reverse creation order.
        self.surface = None;
        self.device = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Counts {
        devices_created: u32,
        devices_live: u32,
        surfaces_created: u32,
        surfaces_live: u32,
        resizes: u32,
        drop_order: Vec<&'static str>,
    }

    struct FakeDevice {
        counts: Rc<RefCell<Counts>>,
    }

    impl Drop for FakeDevice {
        fn drop(&mut self) {
            let mut c = self.counts.borrow_mut();
            c.devices_live -= 1;
            c.drop_order.push("device");
        }
    }

    struct FakeSurface {
        counts: Rc<RefCell<Counts>>,
        size: (u32, u32),
    }

    impl Drop for FakeSurface {
        fn drop(&mut self) {
            let mut c = self.counts.borrow_mut();
            c.surfaces_live -= 1;
            c.drop_order.push("surface");
        }
    }

    #[derive(Default)]
    struct FakePort {
        counts: Rc<RefCell<Counts>>,
        lose_on_next_resize: bool,
    }

    impl GpuPort for FakePort {
        type Device = FakeDevice;
        type Surface = FakeSurface;

        fn create_device(&mut self) -> Result<FakeDevice> {
            let mut c = self.counts.borrow_mut();
            c.devices_created += 1;
            c.devices_live += 1;
            drop(c);
            Ok(FakeDevice {
                counts: self.counts.clone(),
            })
        }

        fn create_surface(
            &mut self,
            _device: &FakeDevice,
            width: u32,
            height: u32,
        ) -> Result<FakeSurface> {
            let mut c = self.counts.borrow_mut();
            c.surfaces_created += 1;
            c.surfaces_live += 1;
            drop(c);
            Ok(FakeSurface {
                counts: self.counts.clone(),
                size: (width, height),
            })
        }

        fn resize_surface(
            &mut self,
            _device: &FakeDevice,
            surface: &mut FakeSurface,
            width: u32,
            height: u32,
        ) -> SurfaceStatus {
            if self.lose_on_next_resize {
                self.lose_on_next_resize = false;
                return SurfaceStatus::DeviceLost;
            }
            self.counts.borrow_mut().resizes += 1;
            surface.size = (width, height);
            SurfaceStatus::Ok
        }
    }

    fn lifecycle() -> (ResourceLifecycle<FakePort>, Rc<RefCell<Counts>>) {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let port = FakePort {
            counts: counts.clone(),
            lose_on_next_resize: false,
        };
        (ResourceLifecycle::new(port), counts)
    }

    // ── forward walk ──────────────────────────────────────────────────────

    #[test]
    fn ensure_ready_walks_to_surface_ready() {
        let (mut lc, counts) = lifecycle();
        assert_eq!(lc.state(), LifecycleState::FactoryReady);

        lc.ensure_ready(800, 600).unwrap();

        assert_eq!(lc.state(), LifecycleState::SurfaceReady);
        assert_eq!(lc.size(), (800, 600));
        let c = counts.borrow();
        assert_eq!(c.devices_created, 1);
        assert_eq!(c.surfaces_created, 1);
    }

    #[test]
    fn ensure_ready_is_idempotent() {
        let (mut lc, counts) = lifecycle();
        lc.ensure_ready(800, 600).unwrap();
        let generation = lc.device_generation();

        lc.ensure_ready(800, 600).unwrap();

        let c = counts.borrow();
        assert_eq!(c.devices_created, 1);
        assert_eq!(c.surfaces_created, 1);
        assert_eq!(c.resizes, 0);
        assert_eq!(lc.device_generation(), generation);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn size_change_resizes_surface_in_place() {
        let (mut lc, counts) = lifecycle();
        lc.ensure_ready(800, 600).unwrap();

        lc.ensure_ready(1024, 768).unwrap();

        let c = counts.borrow();
        assert_eq!(c.resizes, 1);
        assert_eq!(c.surfaces_created, 1, "resize must not reallocate");
        assert_eq!(c.devices_created, 1, "device tier must be untouched");
        assert_eq!(lc.size(), (1024, 768));
    }

    #[test]
    fn resize_before_surface_exists_is_a_no_op() {
        let (mut lc, counts) = lifecycle();
        lc.resize(1024, 768).unwrap();
        assert_eq!(lc.state(), LifecycleState::FactoryReady);
        assert_eq!(counts.borrow().devices_created, 0);
    }

    #[test]
    fn device_lost_during_resize_falls_back_to_full_recovery() {
        let (mut lc, counts) = lifecycle();
        lc.ensure_ready(800, 600).unwrap();
        let first_generation = lc.device_generation();
        lc.port.lose_on_next_resize = true;

        lc.ensure_ready(1024, 768).unwrap();

        assert_eq!(lc.state(), LifecycleState::SurfaceReady);
        assert_eq!(lc.size(), (1024, 768));
        assert!(lc.device_generation() > first_generation);
        let c = counts.borrow();
        assert_eq!(c.devices_created, 2);
        assert_eq!(c.surfaces_created, 2);
        assert_eq!(c.devices_live, 1, "no leaked prior-generation device");
        assert_eq!(c.surfaces_live, 1, "no leaked prior-generation surface");
    }

    // ── device loss at present ────────────────────────────────────────────

    #[test]
    fn device_lost_recovery_restores_surface_ready_without_leaks() {
        let (mut lc, counts) = lifecycle();
        lc.ensure_ready(800, 600).unwrap();

        lc.handle_device_lost();
        assert_eq!(lc.state(), LifecycleState::FactoryReady);
        {
            let c = counts.borrow();
            assert_eq!(c.devices_live, 0);
            assert_eq!(c.surfaces_live, 0);
        }

        lc.ensure_ready(800, 600).unwrap();

        assert_eq!(lc.state(), LifecycleState::SurfaceReady);
        let c = counts.borrow();
        assert_eq!(c.devices_live, 1);
        assert_eq!(c.surfaces_live, 1);
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn teardown_releases_surface_before_device() {
        let (mut lc, counts) = lifecycle();
        lc.ensure_ready(800, 600).unwrap();

        drop(lc);

        assert_eq!(counts.borrow().drop_order, vec!["surface", "device"]);
    }
}
