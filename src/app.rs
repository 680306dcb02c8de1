// Lifecycle: open camera + window, run the refresh loop, release everything once.

use crate::camera::{resolve_camera, CaptureSource, NokhwaCamera};
use crate::config::{OverlayConfig, Settings};
use crate::display::{DisplaySurface, MinifbSurface, SurfaceInput, SurfaceSpec};
use crate::error::Error;
use crate::pipeline::{Pipeline, Tick};
use crate::scheduler::{Pacer, RefreshScheduler, ThreadPacer};

/// Where camera devices and windows come from.
pub trait Platform {
    type Capture: CaptureSource;
    type Surface: DisplaySurface;

    fn open_capture(&mut self, index: u32, width: u32, height: u32)
        -> Result<Self::Capture, Error>;

    fn create_surface(&mut self, spec: &SurfaceSpec) -> Result<Self::Surface, Error>;
}

/// nokhwa cameras shown in minifb windows.
pub struct NativePlatform;

impl Platform for NativePlatform {
    type Capture = NokhwaCamera;
    type Surface = MinifbSurface;

    fn open_capture(&mut self, index: u32, width: u32, height: u32) -> Result<NokhwaCamera, Error> {
        NokhwaCamera::open(index, width, height)
    }

    fn create_surface(&mut self, spec: &SurfaceSpec) -> Result<MinifbSurface, Error> {
        MinifbSurface::create(spec)
    }
}

pub struct App<C: CaptureSource, S: DisplaySurface> {
    pipeline: Pipeline<C, S>,
    scheduler: RefreshScheduler,
    camera_index: u32,
    released: bool,
}

impl<C: CaptureSource, S: DisplaySurface> App<C, S> {
    /// Open the camera, create the centered window and run the first tick.
    /// A camera that can't be opened is fatal and returned as is.
    pub fn start<P>(platform: &mut P, settings: &Settings) -> Result<Self, Error>
    where
        P: Platform<Capture = C, Surface = S>,
    {
        let selection = resolve_camera(&settings.camera);

        let mut capture =
            platform.open_capture(selection.index, settings.width, settings.height)?;

        let spec = SurfaceSpec::overlay(&settings.nickname, settings.width, settings.height);
        let surface = match platform.create_surface(&spec) {
            Ok(surface) => surface,
            Err(e) => {
                capture.close();
                return Err(e);
            }
        };

        let mut app = Self {
            pipeline: Pipeline::new(capture, surface, OverlayConfig::new(&settings.nickname)),
            scheduler: RefreshScheduler::default(),
            camera_index: selection.index,
            released: false,
        };

        let first = app.scheduler.start(&mut app.pipeline);
        log::debug!("first tick: {first:?}");
        Ok(app)
    }

    pub fn camera_index(&self) -> u32 {
        self.camera_index
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn pipeline(&self) -> &Pipeline<C, S> {
        &self.pipeline
    }

    /// Run one scheduled tick by hand.
    pub fn tick(&mut self) -> Tick {
        self.scheduler.tick(&mut self.pipeline)
    }

    /// Block in the refresh loop until quit, then release everything.
    pub fn run(&mut self) {
        self.run_with(&mut ThreadPacer);
    }

    pub fn run_with<P: Pacer>(&mut self, pacer: &mut P) {
        if self.scheduler.run(&mut self.pipeline, pacer) == SurfaceInput::Shutdown {
            log::debug!("quit requested from the window");
        }
        self.stop();
    }

    /// Stop ticking, release the camera, close the window. Safe to repeat.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        if !self.released {
            self.released = true;
            self.pipeline.release();
        }
    }
}

impl<C: CaptureSource, S: DisplaySurface> Drop for App<C, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
