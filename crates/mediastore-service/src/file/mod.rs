//! File engine: managed files, compressed bundles, recordings.

pub mod compress;
pub mod recording;
pub mod service;

pub use compress::DownloadUri;
pub use recording::RecordingBundle;
pub use service::{CreateFileRequest, FileEngine};
