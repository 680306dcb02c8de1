// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The camera at `index` could not be opened or started streaming.
    #[error("Could not open camera {index}: {reason}")]
    DeviceUnavailable { index: u32, reason: String },

    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Grabbing/decoding a frame failed.
    #[error("Camera frame error: {0}")]
    CameraFrame(String),

    /// A required command line flag was not given.
    #[error("--{0} is required")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
