//! Name listings derived from an archive's directory.
//!
//! Each query runs either against an open [`Wad`] or directly against a
//! stream or path.  The stream forms read only the header and directory.
//!
//! Map detection is a convention, not a structural property: a map is a
//! header lump immediately followed by [`MAP_MARKER`] (`THINGS`).  Archives
//! that do not follow it produce no map names.

use std::io::{Read, Seek};
use std::path::Path;

use tracing::warn;

use crate::archive::Wad;
use crate::error::Result;
use crate::io_stream::{open_source, WadReader};
use crate::list::OwningList;
use crate::name::{LumpName, MAP_MARKER};

pub fn lump_names(wad: &Wad) -> OwningList<LumpName> {
    collect_lump_names(wad.lumps().iter().map(|l| l.descriptor.name))
}

pub fn map_names(wad: &Wad) -> OwningList<LumpName> {
    collect_map_names(wad.lumps().iter().map(|l| l.descriptor.name))
}

pub fn lump_names_from_reader<R: Read + Seek>(reader: R) -> Result<OwningList<LumpName>> {
    let reader = WadReader::new(reader)?;
    Ok(collect_lump_names(reader.directory.iter().map(|d| d.name)))
}

pub fn map_names_from_reader<R: Read + Seek>(reader: R) -> Result<OwningList<LumpName>> {
    let reader = WadReader::new(reader)?;
    Ok(collect_map_names(reader.directory.iter().map(|d| d.name)))
}

pub fn lump_names_at<P: AsRef<Path>>(path: P) -> Result<OwningList<LumpName>> {
    lump_names_from_reader(open_source(path.as_ref())?)
}

pub fn map_names_at<P: AsRef<Path>>(path: P) -> Result<OwningList<LumpName>> {
    map_names_from_reader(open_source(path.as_ref())?)
}

fn collect_lump_names(names: impl Iterator<Item = LumpName>) -> OwningList<LumpName> {
    let mut list = OwningList::new(2);
    for name in names {
        list.push(name);
    }
    list
}

fn collect_map_names(names: impl Iterator<Item = LumpName>) -> OwningList<LumpName> {
    let mut list = OwningList::new(2);
    let mut previous: Option<LumpName> = None;
    for (index, name) in names.enumerate() {
        if name == MAP_MARKER {
            match previous {
                Some(map) => list.push(map),
                None => warn!(index, "THINGS lump has no preceding map lump"),
            }
        }
        previous = Some(name);
    }
    list
}
