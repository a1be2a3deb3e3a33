use std::path::PathBuf;

use trellis::FontId;

/// Errors raised while registering fonts
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no font face could be parsed for {name:?}")]
    Parse { name: FontId },

    #[error("font name must not be empty")]
    EmptyName,
}
