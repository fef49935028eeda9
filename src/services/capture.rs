use crate::models::photo::CapturedPhoto;
use chrono::Local;
use image::DynamicImage;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use xcap::Monitor;

/// Capture failures, split by stage
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No device could be bound; the camera screen stays navigable without a
    /// preview
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),
    /// Hardware or I/O failure during a still capture; non-fatal, the user
    /// may retry
    #[error("still capture failed: {0}")]
    CaptureFailed(String),
}

/// Source of still frames - the camera device abstraction
///
/// Production code binds a monitor via xcap; tests substitute synthetic
/// sources.
pub trait FrameSource: Send + Sync {
    fn grab_frame(&self) -> Result<DynamicImage, CaptureError>;
}

/// Thread-safe wrapper for xcap::Monitor
///
/// SAFETY: Monitor is a handle to OS display resources; the underlying
/// handles are thread-safe at the OS level and xcap operations are
/// internally synchronized. We only use it for read-only capture.
#[derive(Clone)]
struct SendSyncMonitor(Monitor);

unsafe impl Send for SendSyncMonitor {}
unsafe impl Sync for SendSyncMonitor {}

/// Frame source backed by a monitor, the desktop stand-in for a phone camera
pub struct ScreenSource {
    monitor: SendSyncMonitor,
}

impl ScreenSource {
    /// Bind the primary monitor
    pub fn primary() -> Result<Self, CaptureError> {
        let monitor = Monitor::all()
            .map_err(|e| CaptureError::DeviceUnavailable(format!("failed to get monitors: {}", e)))?
            .into_iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .ok_or_else(|| CaptureError::DeviceUnavailable("no primary monitor found".to_string()))?;

        Ok(Self {
            monitor: SendSyncMonitor(monitor),
        })
    }

    /// Bind a specific monitor by index
    pub fn with_monitor(monitor_index: usize) -> Result<Self, CaptureError> {
        let monitors = Monitor::all()
            .map_err(|e| CaptureError::DeviceUnavailable(format!("failed to get monitors: {}", e)))?;

        let monitor = monitors
            .get(monitor_index)
            .ok_or_else(|| {
                CaptureError::DeviceUnavailable(format!("monitor index {} not found", monitor_index))
            })?
            .clone();

        Ok(Self {
            monitor: SendSyncMonitor(monitor),
        })
    }
}

impl FrameSource for ScreenSource {
    fn grab_frame(&self) -> Result<DynamicImage, CaptureError> {
        let rgba_image = self
            .monitor
            .0
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(format!("failed to capture frame: {}", e)))?;

        Ok(DynamicImage::ImageRgba8(rgba_image))
    }
}

/// Owns the bound frame source and writes timestamp-named JPEG stills
///
/// One file write per successful capture. Dropping the controller releases
/// the device binding.
pub struct CaptureController {
    source: Arc<dyn FrameSource>,
    output_dir: PathBuf,
    // Last timestamp stem and how many captures landed in that second
    last_stamp: Mutex<Option<(String, u32)>>,
}

impl CaptureController {
    /// Attach a frame source and prepare the output directory
    pub fn bind(source: Arc<dyn FrameSource>, output_dir: PathBuf) -> Result<Self, CaptureError> {
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            CaptureError::DeviceUnavailable(format!(
                "failed to prepare output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            source,
            output_dir,
            last_stamp: Mutex::new(None),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Pick the next file name, suffixing `_N` when a second produces more
    /// than one capture
    fn next_file_name(&self, stamp: String) -> String {
        let mut last = self.last_stamp.lock();
        match last.as_mut() {
            Some((prev, n)) if *prev == stamp => {
                *n += 1;
                format!("{}_{}.jpg", stamp, n)
            }
            _ => {
                let name = format!("{}.jpg", stamp);
                *last = Some((stamp, 0));
                name
            }
        }
    }

    /// Trigger a still capture and write it to disk
    pub async fn capture(&self) -> Result<CapturedPhoto, CaptureError> {
        let taken_at = Local::now();
        let stamp = taken_at.format("%Y%m%d_%H%M%S").to_string();
        let path = self.output_dir.join(self.next_file_name(stamp));

        let source = Arc::clone(&self.source);
        let out = path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), CaptureError> {
            let frame = source.grab_frame()?;
            // JPEG has no alpha channel
            frame.to_rgb8().save_with_format(&out, image::ImageFormat::Jpeg).map_err(|e| {
                CaptureError::CaptureFailed(format!("failed to write {}: {}", out.display(), e))
            })
        })
        .await
        .map_err(|e| CaptureError::CaptureFailed(format!("capture task failed: {}", e)))??;

        tracing::info!(path = %path.display(), "photo saved");
        Ok(CapturedPhoto::new(path, taken_at))
    }
}
