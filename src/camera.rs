// Camera side of the pipeline: open a device, pull frames, release it.
// Also resolves the user's device selector and lists what is plugged in.

use std::io::{self, Write};

use crate::error::Error;
use crate::types::FrameBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that can hand the pipeline one frame per tick.
pub trait CaptureSource {
    /// One frame, or `None` when this read failed. A `None` is never fatal.
    fn try_read_frame(&mut self) -> Option<FrameBuffer>;

    /// Release the device. Calling it again does nothing.
    fn close(&mut self);
}

/// Result of turning the `--camera` argument into a device index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraSelection {
    pub index: u32,
    /// True when the selector was not a number and device 0 was substituted.
    pub fallback: bool,
}

/// Numeric selectors pass through; anything else means device 0.
/// Name-based lookup is not supported, so the fallback is always reported.
pub fn resolve_camera(selector: &str) -> CameraSelection {
    match selector.trim().parse::<u32>() {
        Ok(index) => CameraSelection { index, fallback: false },
        Err(_) => {
            log::warn!("Could not parse camera '{selector}', using camera 0");
            CameraSelection { index: 0, fallback: true }
        }
    }
}

// A small wrapper around nokhwa::Camera so the pipeline stays clean.
pub struct NokhwaCamera {
    cam: Option<Camera>, // None once closed
    index: u32,
}

impl NokhwaCamera {
    /// Open camera `index` near the requested resolution and start streaming.
    /// The device may pick a slightly different size; it is logged at info.
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let unavailable = |reason: String| Error::DeviceUnavailable { index, reason };

        // 1) Ask for RGB frames closest to our size at 30 FPS.
        let fmt = CameraFormat::new(Resolution::new(width, height), FrameFormat::YUYV, 30);
        let closest = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // 2) Some backends refuse YUYV outright; then take whatever runs fastest.
        let mut cam = match Camera::new(CameraIndex::Index(index), closest) {
            Ok(cam) => cam,
            Err(e) => {
                log::debug!("camera {index}: closest format refused ({e}), retrying");
                let any = RequestedFormat::new::<RgbFormat>(
                    RequestedFormatType::AbsoluteHighestFrameRate,
                );
                Camera::new(CameraIndex::Index(index), any)
                    .map_err(|e| unavailable(format!("Create camera: {e}")))?
            }
        };

        // 3) Start streaming frames from the camera.
        cam.open_stream()
            .map_err(|e| unavailable(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        log::info!(
            "camera {index} streaming at {}x{} (requested {width}x{height})",
            actual.width(),
            actual.height()
        );

        Ok(Self {
            cam: Some(cam),
            index,
        })
    }

    fn read_frame(cam: &mut Camera) -> Result<FrameBuffer, Error> {
        let frame = cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        Ok(FrameBuffer::from_rgb_image(decoded))
    }
}

impl CaptureSource for NokhwaCamera {
    fn try_read_frame(&mut self) -> Option<FrameBuffer> {
        let cam = self.cam.as_mut()?;
        match Self::read_frame(cam) {
            Ok(frame) => Some(frame),
            Err(e) => {
                log::debug!("camera {}: skipping tick: {e}", self.index);
                None
            }
        }
    }

    fn close(&mut self) {
        if let Some(mut cam) = self.cam.take() {
            if let Err(e) = cam.stop_stream() {
                log::debug!("camera {}: stop stream: {e}", self.index);
            }
            log::info!("camera {} released", self.index);
        }
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.close();
    }
}

/* ---------- --list-cameras ---------- */

/// One working device found while probing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraListing {
    pub index: u32,
    pub backend: String,
    pub width: u32,
    pub height: u32,
}

/// Try indices `0..max` with `probe`, keeping the ones that delivered a frame.
pub fn probe_cameras<F>(max: u32, mut probe: F) -> Vec<CameraListing>
where
    F: FnMut(u32) -> Option<CameraListing>,
{
    (0..max).filter_map(|i| probe(i)).collect()
}

/// Open device `index`, read one frame, report how it negotiated.
pub fn probe_native(index: u32) -> Option<CameraListing> {
    let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
    let mut cam = Camera::new(CameraIndex::Index(index), req).ok()?;
    cam.open_stream().ok()?;

    let listing = cam.frame().ok().map(|_| {
        let res = cam.resolution();
        CameraListing {
            index,
            backend: format!("{:?}", cam.backend()),
            width: res.width(),
            height: res.height(),
        }
    });

    if let Err(e) = cam.stop_stream() {
        log::debug!("camera {index}: stop stream after probe: {e}");
    }
    listing
}

/// Print the listing the way `--list-cameras` shows it.
pub fn write_listing<W: Write>(out: &mut W, cameras: &[CameraListing]) -> io::Result<()> {
    writeln!(out, "Available cameras:")?;
    for c in cameras {
        writeln!(
            out,
            "  {}: Camera {} ({}, {}x{})",
            c.index, c.index, c.backend, c.width, c.height
        )?;
    }
    if cameras.is_empty() {
        writeln!(out, "  No cameras found")?;
    }
    Ok(())
}

/// Probe `0..max` and print what answered. Returns the working devices.
pub fn list_cameras<W, F>(out: &mut W, max: u32, probe: F) -> Result<Vec<CameraListing>, Error>
where
    W: Write,
    F: FnMut(u32) -> Option<CameraListing>,
{
    let found = probe_cameras(max, probe);
    write_listing(out, &found)?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    // Keeps every log record emitted by this test binary.
    struct Capture;

    static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
    static INIT: Once = Once::new();

    impl log::Log for Capture {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let mut records = RECORDS.lock().unwrap_or_else(|e| e.into_inner());
            records.push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    fn capture_logs() {
        INIT.call_once(|| {
            log::set_logger(&Capture).expect("no other logger in unit tests");
            log::set_max_level(log::LevelFilter::Trace);
        });
    }

    fn warnings_mentioning(needle: &str) -> usize {
        let records = RECORDS.lock().unwrap_or_else(|e| e.into_inner());
        records
            .iter()
            .filter(|(level, msg)| *level == log::Level::Warn && msg.contains(needle))
            .count()
    }

    #[test]
    fn numeric_selector_passes_through() {
        assert_eq!(resolve_camera("2"), CameraSelection { index: 2, fallback: false });
        assert_eq!(resolve_camera(" 0 "), CameraSelection { index: 0, fallback: false });
    }

    #[test]
    fn named_selector_falls_back_to_zero() {
        assert_eq!(resolve_camera("front"), CameraSelection { index: 0, fallback: true });
        assert_eq!(resolve_camera("-1"), CameraSelection { index: 0, fallback: true });
    }

    #[test]
    fn named_selector_fallback_is_warned_about() {
        capture_logs();
        resolve_camera("front-facing");
        assert!(warnings_mentioning("'front-facing'") >= 1);
        assert!(warnings_mentioning("using camera 0") >= 1);
    }

    #[test]
    fn numeric_selector_is_not_warned_about() {
        capture_logs();
        resolve_camera("31337");
        assert_eq!(warnings_mentioning("31337"), 0);
    }

    #[test]
    fn no_devices_lists_nothing() {
        let mut probed = Vec::new();
        let found = probe_cameras(10, |i| {
            probed.push(i);
            None
        });
        assert!(found.is_empty());
        assert_eq!(probed, (0..10).collect::<Vec<_>>());

        let mut out = Vec::new();
        write_listing(&mut out, &found).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No cameras found"));
    }

    #[test]
    fn listing_reports_backend_and_resolution() {
        let found = probe_cameras(4, |i| {
            (i == 1).then(|| CameraListing {
                index: i,
                backend: "Video4Linux".into(),
                width: 640,
                height: 480,
            })
        });
        assert_eq!(found.len(), 1);

        let mut out = Vec::new();
        write_listing(&mut out, &found).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Available cameras:\n  1: Camera 1 (Video4Linux, 640x480)\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn list_with_no_devices_prints_and_returns_empty() {
        let mut out = Vec::new();
        let found = list_cameras(&mut out, 10, |_| None).unwrap();
        assert!(found.is_empty());
        assert!(String::from_utf8(out).unwrap().ends_with("  No cameras found\n"));
    }

    #[test]
    fn list_reports_write_failures_as_io_errors() {
        let err = list_cameras(&mut BrokenPipe, 2, |_| None).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
