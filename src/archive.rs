//! High-level [`Wad`] API — the surface front ends call.
//!
//! ```no_run
//! use wadtools::archive::Wad;
//! use wadtools::combine::CombineOptions;
//!
//! // Inspect
//! let wad = Wad::open("doom.wad")?;
//! for map in wad.map_names().iter() {
//!     println!("{map}");
//! }
//!
//! // Merge and persist
//! let merged = Wad::combine(&["doom.wad", "extra.wad"], &CombineOptions::default())?;
//! merged.write("combined.wad")?;
//! # Ok::<(), wadtools::WadError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use tracing::debug;

use crate::combine::{self, CombineOptions};
use crate::error::{Result, WadError};
use crate::header::WadHeader;
use crate::io_stream::{open_source, WadReader, WadWriter};
use crate::layout;
use crate::list::OwningList;
use crate::lump::{LumpBundle, LumpDescriptor};
use crate::name::LumpName;
use crate::query;

// ── Wad ───────────────────────────────────────────────────────────────────────

/// A fully materialized archive: header plus lumps in directory order.
///
/// `header.lump_count` always equals `lumps().len()`.  A model returned by
/// [`Wad::open`] keeps the offsets of its source stream, so writing it
/// back reproduces the source layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wad {
    header: WadHeader,
    lumps:  Vec<LumpBundle>,
}

impl Wad {
    // ── Constructors ─────────────────────────────────────────────────────────

    pub(crate) fn from_parts(header: WadHeader, lumps: Vec<LumpBundle>) -> Self {
        debug_assert_eq!(header.lump_count as usize, lumps.len());
        Self { header, lumps }
    }

    /// Read the archive at `path` into memory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let wad = WadReader::new(open_source(path)?)?.into_wad()?;
        debug!(path = %path.display(), lumps = wad.lumps.len(), "opened WAD");
        Ok(wad)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        WadReader::new(Cursor::new(bytes))?.into_wad()
    }

    /// Assemble an archive from named payloads using the append layout.
    pub fn from_lumps<I>(tag: [u8; 4], lumps: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LumpName, Vec<u8>)>,
    {
        let mut bundles = Vec::new();
        for (name, data) in lumps {
            let length = i32::try_from(data.len()).map_err(|_| {
                WadError::TooLarge(format!("lump {name} holds {} bytes", data.len()))
            })?;
            bundles.push(LumpBundle {
                descriptor: LumpDescriptor { data_offset: 0, length, name },
                data,
            });
        }
        Self::with_append_layout(tag, bundles)
    }

    /// Build a model whose offsets follow the append layout.
    pub(crate) fn with_append_layout(tag: [u8; 4], mut lumps: Vec<LumpBundle>) -> Result<Self> {
        let layout = layout::compute(&lumps)?;
        layout::apply(&layout, &mut lumps);
        let header = WadHeader {
            tag,
            lump_count:       layout.lump_count,
            directory_offset: layout.directory_offset,
        };
        Ok(Self::from_parts(header, lumps))
    }

    /// Merge the archives at `paths`, in order.  See [`crate::combine`].
    pub fn combine<P: AsRef<Path>>(paths: &[P], opts: &CombineOptions) -> Result<Self> {
        combine::combine_paths(paths, opts)
    }

    /// Same lumps, re-laid out with payloads first and the directory last.
    pub fn relayout(self) -> Result<Self> {
        let tag = self.header.tag;
        Self::with_append_layout(tag, self.lumps)
    }

    // ── Write ─────────────────────────────────────────────────────────────────

    /// Create (or truncate) `path` and write the archive into it.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WadError::WriteFailure {
            path: path.to_owned(),
            source,
        })?;
        let mut writer = WadWriter::new(BufWriter::new(file));
        writer.write(self)?;
        debug!(path = %path.display(), "wrote WAD file");
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = WadWriter::new(Cursor::new(Vec::new()));
        writer.write(self)?;
        Ok(writer.into_inner().into_inner())
    }

    // ── Read ──────────────────────────────────────────────────────────────────

    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    pub fn lumps(&self) -> &[LumpBundle] {
        &self.lumps
    }

    #[cfg(test)]
    pub(crate) fn lumps_mut(&mut self) -> &mut [LumpBundle] {
        &mut self.lumps
    }

    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    /// First lump with the given name, in directory order.
    pub fn find(&self, name: &str) -> Option<&LumpBundle> {
        self.lumps.iter().find(|lump| lump.descriptor.name == name)
    }

    pub fn into_lumps(self) -> Vec<LumpBundle> {
        self.lumps
    }

    pub fn lump_names(&self) -> OwningList<LumpName> {
        query::lump_names(self)
    }

    pub fn map_names(&self) -> OwningList<LumpName> {
        query::map_names(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{HEADER_SIZE, IWAD, PWAD};

    fn name(s: &str) -> LumpName {
        LumpName::new(s).unwrap()
    }

    #[test]
    fn from_lumps_uses_append_layout() {
        let wad = Wad::from_lumps(
            PWAD,
            vec![(name("MAP01"), vec![]), (name("THINGS"), vec![1, 2, 3]), (name("VERTEXES"), vec![4; 8])],
        )
        .unwrap();
        assert_eq!(wad.header().lump_count, 3);
        assert_eq!(wad.header().directory_offset, (HEADER_SIZE + 11) as i32);
        let offsets: Vec<i32> = wad.lumps().iter().map(|l| l.descriptor.data_offset).collect();
        assert_eq!(offsets, vec![12, 12, 15]);
    }

    #[test]
    fn bytes_round_trip() {
        let wad = Wad::from_lumps(IWAD, vec![(name("PLAYPAL"), vec![7; 32]), (name("F_START"), vec![])])
            .unwrap();
        let bytes = wad.to_bytes().unwrap();
        assert_eq!(bytes.len(), 12 + 32 + 2 * 16);
        let back = Wad::from_bytes(&bytes).unwrap();
        assert_eq!(back, wad);
        assert_eq!(back.find("PLAYPAL").map(|l| l.len()), Some(32));
        assert!(back.find("MISSING").is_none());
    }

    #[test]
    fn relayout_packs_a_sparse_source() {
        // Directory first, payload at the end, with a gap in between.
        let mut bytes = Vec::new();
        WadHeader { tag: PWAD, lump_count: 1, directory_offset: 12 }.write(&mut bytes).unwrap();
        LumpDescriptor { data_offset: 40, length: 3, name: name("DEMO1") }.write(&mut bytes).unwrap();
        bytes.resize(40, 0);
        bytes.extend_from_slice(b"xyz");

        let wad = Wad::from_bytes(&bytes).unwrap();
        assert_eq!(wad.lumps()[0].descriptor.data_offset, 40);
        let packed = wad.relayout().unwrap();
        assert_eq!(packed.lumps()[0].descriptor.data_offset, 12);
        assert_eq!(packed.header().directory_offset, 15);
        assert_eq!(packed.to_bytes().unwrap().len(), 15 + 16);
        assert_eq!(packed.lumps()[0].data, b"xyz");
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let err = Wad::open("/definitely/not/here.wad").unwrap_err();
        assert!(matches!(err, WadError::NotFound { .. }));
    }

    #[test]
    fn open_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Wad::open(dir.path()).unwrap_err();
        assert!(matches!(err, WadError::NotFound { .. }));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let wad = Wad::from_lumps(PWAD, Vec::new()).unwrap();
        let err = wad.write("/definitely/not/here/out.wad").unwrap_err();
        assert!(matches!(err, WadError::WriteFailure { .. }));
    }
}
