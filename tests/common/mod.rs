// Scripted stand-ins for the camera, the window and the platform.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use battlecam::app::Platform;
use battlecam::camera::CaptureSource;
use battlecam::display::{DisplaySurface, SurfaceInput, SurfaceSpec};
use battlecam::scheduler::Pacer;
use battlecam::types::{ChannelOrder, DisplayBitmap, FrameBuffer};
use battlecam::Error;

/// Everything the mocks saw, shared with the test body.
#[derive(Default)]
pub struct Log {
    pub reads: u32,
    pub closes: u32,
    pub presents: Vec<DisplayBitmap>,
    pub destroys: u32,
    pub pumps: u32,
    pub waits: Vec<Duration>,
    pub surface_specs: Vec<SurfaceSpec>,
    pub opened: Vec<(u32, u32, u32)>,
}

pub type Shared = Rc<RefCell<Log>>;

pub fn shared() -> Shared {
    Rc::new(RefCell::new(Log::default()))
}

/// Returns a solid frame, except on reads listed in `drops` (1-based).
pub struct MockCapture {
    pub log: Shared,
    pub width: usize,
    pub height: usize,
    pub color: [u8; 3],
    pub drops: Vec<u32>,
}

impl CaptureSource for MockCapture {
    fn try_read_frame(&mut self) -> Option<FrameBuffer> {
        let mut log = self.log.borrow_mut();
        log.reads += 1;
        if self.drops.contains(&log.reads) {
            return None;
        }
        Some(FrameBuffer::filled(self.width, self.height, ChannelOrder::Rgb, self.color))
    }

    fn close(&mut self) {
        self.log.borrow_mut().closes += 1;
    }
}

/// Records presents; answers pumps from a script, then keeps going.
pub struct MockSurface {
    pub log: Shared,
    pub inputs: VecDeque<SurfaceInput>,
}

impl DisplaySurface for MockSurface {
    fn present(&mut self, bitmap: &DisplayBitmap) -> Result<(), Error> {
        self.log.borrow_mut().presents.push(bitmap.clone());
        Ok(())
    }

    fn pump_events(&mut self) -> SurfaceInput {
        self.log.borrow_mut().pumps += 1;
        self.inputs.pop_front().unwrap_or(SurfaceInput::Continue)
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().destroys += 1;
    }
}

pub struct MockPlatform {
    pub log: Shared,
    pub color: [u8; 3],
    pub drops: Vec<u32>,
    pub inputs: Vec<SurfaceInput>,
    pub camera_missing: bool,
    pub window_fails: bool,
}

impl MockPlatform {
    pub fn new(log: &Shared) -> Self {
        Self {
            log: log.clone(),
            color: [200, 100, 50],
            drops: Vec::new(),
            inputs: Vec::new(),
            camera_missing: false,
            window_fails: false,
        }
    }
}

impl Platform for MockPlatform {
    type Capture = MockCapture;
    type Surface = MockSurface;

    fn open_capture(&mut self, index: u32, width: u32, height: u32) -> Result<MockCapture, Error> {
        if self.camera_missing {
            return Err(Error::DeviceUnavailable { index, reason: "no such device".into() });
        }
        self.log.borrow_mut().opened.push((index, width, height));
        Ok(MockCapture {
            log: self.log.clone(),
            width: width as usize,
            height: height as usize,
            color: self.color,
            drops: self.drops.clone(),
        })
    }

    fn create_surface(&mut self, spec: &SurfaceSpec) -> Result<MockSurface, Error> {
        if self.window_fails {
            return Err(Error::WindowInit("no display".into()));
        }
        self.log.borrow_mut().surface_specs.push(spec.clone());
        Ok(MockSurface {
            log: self.log.clone(),
            inputs: self.inputs.iter().copied().collect(),
        })
    }
}

/// Records requested waits instead of sleeping.
pub struct RecordingPacer {
    pub log: Shared,
}

impl Pacer for RecordingPacer {
    fn wait(&mut self, remaining: Duration) {
        self.log.borrow_mut().waits.push(remaining);
    }
}

pub fn settings(nickname: &str, camera: &str) -> battlecam::config::Settings {
    battlecam::config::Settings {
        nickname: nickname.into(),
        camera: camera.into(),
        width: 320,
        height: 240,
    }
}
