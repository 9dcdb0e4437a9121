use crate::ExportError;
use carta_raster::{Bitmap, CaptureError, FontLibrary};
use carta_render::ExportSurface;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// The offscreen rendering container an export job captures into.
///
/// A scoped resource: acquiring it claims the single per-catalog job slot,
/// and dropping it releases the slot on every exit path, success or not.
/// Captures go through a [`HostHandle`]; a handle that outlives its host
/// reports `HostMissing` instead of rendering into nothing.
pub struct OffscreenHost {
    slot: Arc<AtomicBool>,
    fonts: &'static FontLibrary,
    alive: Arc<()>,
}

impl OffscreenHost {
    /// Claims the job slot. Fails when another job already holds it; only
    /// one export may run against a catalog snapshot at a time.
    pub(crate) fn acquire(slot: Arc<AtomicBool>) -> Result<Self, ExportError> {
        if slot
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::JobAlreadyRunning);
        }
        Ok(Self {
            slot,
            fonts: FontLibrary::shared(),
            alive: Arc::new(()),
        })
    }

    pub fn handle(&self) -> HostHandle {
        HostHandle {
            alive: Arc::downgrade(&self.alive),
            fonts: self.fonts,
        }
    }
}

impl Drop for OffscreenHost {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::SeqCst);
    }
}

/// A capture capability tied to a live [`OffscreenHost`].
#[derive(Clone)]
pub struct HostHandle {
    alive: Weak<()>,
    fonts: &'static FontLibrary,
}

impl HostHandle {
    pub fn capture(&self, surface: &ExportSurface, scale: f32) -> Result<Bitmap, CaptureError> {
        if self.alive.upgrade().is_none() {
            return Err(CaptureError::HostMissing);
        }
        surface.capture(scale, self.fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_menu::VenueBranding;
    use carta_plan::Page;
    use carta_types::Palette;

    fn slot() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn test_slot_is_exclusive_and_released_on_drop() {
        let slot = slot();
        let host = OffscreenHost::acquire(slot.clone()).unwrap();
        assert!(matches!(
            OffscreenHost::acquire(slot.clone()),
            Err(ExportError::JobAlreadyRunning)
        ));
        drop(host);
        assert!(OffscreenHost::acquire(slot).is_ok());
    }

    #[tokio::test]
    async fn test_capture_after_host_release_reports_missing() {
        let source = carta_assets::InMemoryAssetSource::new();
        let page = Page::Cover { palette: Palette::Brand };
        let surface = ExportSurface::build(0, &page, &VenueBranding::house(), &source).await;

        let host = OffscreenHost::acquire(slot()).unwrap();
        let handle = host.handle();
        assert!(handle.capture(&surface, 1.0).is_ok());

        drop(host);
        assert!(matches!(
            handle.capture(&surface, 1.0),
            Err(CaptureError::HostMissing)
        ));
    }
}
