//! Status table rendering
//!
//! The table lists every participant in roster order, filling columns top
//! to bottom. Dead participants are struck through. The picture is named
//! after the number of participants still alive.

mod table;

pub use table::TableRenderer;

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battlefield::Roster;
use crate::error::WarbotResult;

/// Rows per column before a new column is started
pub const MAX_ROWS_PER_COLUMN: usize = 25;

/// Names longer than this are shortened
pub const MAX_NAME_CHARS: usize = 34;

/// Characters kept from a shortened name, before the ellipsis
pub const TRUNCATED_NAME_CHARS: usize = 31;

/// Anything that can turn a roster into a picture file
pub trait StatusRenderer: Send + Sync {
    /// File extension of the pictures this renderer writes
    fn extension(&self) -> &str;

    /// Render the roster and write the picture to `output`
    fn render(&self, roster: &Roster, output: &Path) -> WarbotResult<()>;
}

/// Supported picture encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// `<alive>remaining.<ext>`
pub fn picture_file_name(alive: usize, extension: &str) -> String {
    format!("{}remaining.{}", alive, extension)
}

/// Name as shown in the table: long names are cut and end with `...`
pub fn display_name(name: &str) -> Cow<'_, str> {
    if name.chars().count() > MAX_NAME_CHARS {
        let cut: String = name.chars().take(TRUNCATED_NAME_CHARS).collect();
        Cow::Owned(cut + "...")
    } else {
        Cow::Borrowed(name)
    }
}

/// Grid dimensions of the status table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub columns: usize,
    pub rows: usize,
}

impl TableLayout {
    /// Spread `len` participants evenly over as few columns as possible
    /// without exceeding [`MAX_ROWS_PER_COLUMN`]
    pub fn for_len(len: usize) -> Self {
        let columns = len.div_ceil(MAX_ROWS_PER_COLUMN).max(1);
        let rows = len.div_ceil(columns).max(1);
        Self { columns, rows }
    }

    /// Column and row of the participant at `index`
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.rows, index % self.rows)
    }
}
