use std::io;
use std::path::PathBuf;

pub use anyhow::{Error, Result};

/// The single failure kind a generation run can surface.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The runner was started with an empty renderer list.
    #[error("no renderers are registered; nothing to generate")]
    NoRenderers,

    /// A renderer failed while its output file was being produced. The
    /// underlying cause (template defect, unwritable path, full disk) is
    /// carried in `source` and not distinguished further.
    #[error("renderer `{name}` failed to generate {}", .path.display())]
    Renderer {
        name: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The progress stream itself could not be written.
    #[error("failed to write progress output")]
    Progress(#[from] io::Error),
}
