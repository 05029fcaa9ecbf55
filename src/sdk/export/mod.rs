pub mod html;
pub mod kml;
pub mod spreadsheet;

use clap::ValueEnum;
use std::{fmt, fs, path::Path, path::PathBuf};
use thiserror::Error;

pub use html::render_html;
pub use kml::build_kml;
pub use spreadsheet::write_spreadsheet;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to serialize map data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cannot render a map for an empty route")]
    EmptyRoute,

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Map artifact produced next to each spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Kml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Kml => "kml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
