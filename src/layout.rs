//! Append layout: header, then every payload back to back in directory
//! order, then the directory.
//!
//! Lump *i* lands at `HEADER_SIZE + sum(length[0..i])` and the directory
//! at `HEADER_SIZE + sum(length)`.  Sums are carried in `i64` and only
//! narrowed once the whole layout is known to fit the 32-bit fields.

use crate::error::{Result, WadError};
use crate::header::HEADER_SIZE;
use crate::lump::{LumpBundle, DESCRIPTOR_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendLayout {
    pub data_offsets:     Vec<i32>,
    pub directory_offset: i32,
    pub lump_count:       i32,
}

impl AppendLayout {
    /// Total size of a stream written with this layout.
    pub fn stream_len(&self) -> u64 {
        self.directory_offset as u64 + self.lump_count as u64 * DESCRIPTOR_SIZE as u64
    }
}

pub fn compute<'a, I>(lumps: I) -> Result<AppendLayout>
where
    I: IntoIterator<Item = &'a LumpBundle>,
{
    compute_lengths(lumps.into_iter().map(|lump| lump.data.len() as u64))
}

/// Lay out payloads of the given byte lengths, in order.
pub fn compute_lengths<I>(lengths: I) -> Result<AppendLayout>
where
    I: IntoIterator<Item = u64>,
{
    let mut cursor = HEADER_SIZE as i64;
    let mut data_offsets = Vec::new();

    for length in lengths {
        data_offsets.push(narrow(cursor, "lump offset")?);
        cursor = cursor.saturating_add(i64::try_from(length).unwrap_or(i64::MAX));
    }

    let directory_offset = narrow(cursor, "directory offset")?;
    let lump_count = i32::try_from(data_offsets.len())
        .map_err(|_| WadError::TooLarge(format!("{} lumps", data_offsets.len())))?;

    // Directory entries must be addressable too.
    let end = cursor + data_offsets.len() as i64 * DESCRIPTOR_SIZE as i64;
    narrow(end, "end of directory")?;

    Ok(AppendLayout {
        data_offsets,
        directory_offset,
        lump_count,
    })
}

/// Rewrite each bundle's `data_offset` from a computed layout.
pub(crate) fn apply(layout: &AppendLayout, lumps: &mut [LumpBundle]) {
    debug_assert_eq!(layout.data_offsets.len(), lumps.len());
    for (lump, &offset) in lumps.iter_mut().zip(&layout.data_offsets) {
        lump.descriptor.data_offset = offset;
    }
}

fn narrow(value: i64, what: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| WadError::TooLarge(format!("{what} {value} exceeds the 32-bit limit")))
}
