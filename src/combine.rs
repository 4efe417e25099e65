//! Merge several archives into one.
//!
//! Lumps are concatenated in argument order, each archive keeping its own
//! directory order, and the result is re-laid out with the append layout.
//! Names and lengths are carried over untouched; only `data_offset`
//! changes.  Combining never touches storage: persist the result with
//! [`Wad::write`].

use std::path::Path;

use tracing::{debug, warn};

use crate::archive::Wad;
use crate::error::Result;
use crate::header::{HEADER_SIZE, IWAD};

/// Configuration for [`combine`] and [`combine_paths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOptions {
    /// Tag written into the combined header.
    pub output_tag: [u8; 4],
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self { output_tag: IWAD }
    }
}

/// Open every path in order and merge the results.
///
/// If any path fails to open, the archives opened so far are released and
/// the error is returned; no partial result is produced.
pub fn combine_paths<P: AsRef<Path>>(paths: &[P], opts: &CombineOptions) -> Result<Wad> {
    let mut wads = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        match Wad::open(path) {
            Ok(wad) => wads.push(wad),
            Err(err) => {
                warn!(path = %path.display(), opened = wads.len(), "combine aborted: {err}");
                return Err(err);
            }
        }
    }
    combine(wads, opts)
}

/// Merge already-open archives.  The inputs are consumed.
pub fn combine(wads: Vec<Wad>, opts: &CombineOptions) -> Result<Wad> {
    let inputs = wads.len();
    let total: usize = wads.iter().map(Wad::len).sum();

    let mut lumps = Vec::with_capacity(total);
    for wad in wads {
        lumps.extend(wad.into_lumps());
    }

    let combined = Wad::with_append_layout(opts.output_tag, lumps)?;
    debug!(
        inputs,
        lumps = combined.len(),
        directory_offset = combined.header().directory_offset,
        data_bytes = combined.header().directory_offset as usize - HEADER_SIZE,
        "combined WADs"
    );
    Ok(combined)
}
