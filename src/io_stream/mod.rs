//! Stream-level reader and writer.
//!
//! # Reader
//! [`WadReader`] reads the 12-byte header and the whole directory up
//! front, validating every offset against the stream length before any
//! seek is made.  Payloads are only read on request, so the name queries
//! can walk a directory without touching lump data.
//!
//! # Writer
//! [`WadWriter`] writes the header at offset 0 and then, for each lump,
//! seeks to its directory slot and to its `data_offset` independently.
//! It trusts the offsets already stored in the model; building a
//! consistent layout is the job of [`crate::layout`].
//!
//! # Endianness
//! All integer fields are little-endian.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::archive::Wad;
use crate::error::{Result, WadError};
use crate::header::{WadHeader, HEADER_SIZE};
use crate::lump::{LumpBundle, LumpDescriptor, DESCRIPTOR_SIZE};

// ── Reader ───────────────────────────────────────────────────────────────────

pub struct WadReader<R: Read + Seek> {
    reader:         R,
    pub header:     WadHeader,
    pub directory:  Vec<LumpDescriptor>,
    pub stream_len: u64,
}

impl<R: Read + Seek> WadReader<R> {
    /// Read and validate the header and directory.  No payload is read.
    pub fn new(mut reader: R) -> Result<Self> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        if stream_len < HEADER_SIZE as u64 {
            return Err(WadError::corrupt(format!(
                "stream is {stream_len} bytes, shorter than the {HEADER_SIZE}-byte header"
            )));
        }

        reader.seek(SeekFrom::Start(0))?;
        let header = WadHeader::read(&mut reader)?;
        check_directory(&header, stream_len)?;

        reader.seek(SeekFrom::Start(header.directory_offset as u64))?;
        let mut directory = Vec::with_capacity(header.lump_count as usize);
        for _ in 0..header.lump_count {
            let desc = LumpDescriptor::read(&mut reader)?;
            check_lump(&desc, stream_len)?;
            directory.push(desc);
        }

        debug!(
            tag = %header.tag_lossy(),
            lumps = header.lump_count,
            directory_offset = header.directory_offset,
            stream_len,
            "read WAD directory"
        );

        Ok(Self { reader, header, directory, stream_len })
    }

    /// Read the payload described by `desc`.  Zero-length lumps never seek.
    pub fn read_lump(&mut self, desc: &LumpDescriptor) -> Result<Vec<u8>> {
        check_lump(desc, self.stream_len)?;
        let mut data = vec![0u8; desc.length as usize];
        if !data.is_empty() {
            self.reader.seek(SeekFrom::Start(desc.data_offset as u64))?;
            self.reader.read_exact(&mut data)?;
        }
        Ok(data)
    }

    /// Materialize every lump in directory order.
    pub fn read_bundles(&mut self) -> Result<Vec<LumpBundle>> {
        let directory = self.directory.clone();
        let mut bundles = Vec::with_capacity(directory.len());
        for descriptor in directory {
            let data = self.read_lump(&descriptor)?;
            bundles.push(LumpBundle { descriptor, data });
        }
        Ok(bundles)
    }

    /// Read every payload and assemble the in-memory archive.
    pub fn into_wad(mut self) -> Result<Wad> {
        let lumps = self.read_bundles()?;
        Ok(Wad::from_parts(self.header, lumps))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn check_directory(header: &WadHeader, stream_len: u64) -> Result<()> {
    if header.lump_count < 0 {
        return Err(WadError::corrupt(format!("negative lump count {}", header.lump_count)));
    }
    if header.directory_offset < 0 {
        return Err(WadError::corrupt(format!(
            "negative directory offset {}",
            header.directory_offset
        )));
    }
    let end = header.directory_offset as u64 + header.lump_count as u64 * DESCRIPTOR_SIZE as u64;
    if end > stream_len {
        return Err(WadError::corrupt(format!(
            "directory of {} entries at {} runs past end of stream ({stream_len} bytes)",
            header.lump_count, header.directory_offset
        )));
    }
    Ok(())
}

fn check_lump(desc: &LumpDescriptor, stream_len: u64) -> Result<()> {
    if desc.length < 0 {
        return Err(WadError::corrupt(format!(
            "lump {} has negative length {}",
            desc.name, desc.length
        )));
    }
    if desc.length == 0 {
        return Ok(());
    }
    if desc.data_offset < 0 || desc.data_end() as u64 > stream_len {
        return Err(WadError::corrupt(format!(
            "lump {} spans {}..{}, outside the {stream_len}-byte stream",
            desc.name,
            desc.data_offset,
            desc.data_end()
        )));
    }
    Ok(())
}

/// Open `path` for reading.  Anything that is not a regular file counts
/// as not found.
pub(crate) fn open_source(path: &Path) -> Result<BufReader<File>> {
    let not_found = |source| WadError::NotFound { path: path.to_owned(), source };
    let file = File::open(path).map_err(not_found)?;
    let meta = file.metadata().map_err(not_found)?;
    if !meta.is_file() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(BufReader::new(file))
}

// ── Writer ───────────────────────────────────────────────────────────────────

pub struct WadWriter<W: Write + Seek> {
    writer: W,
}

impl<W: Write + Seek> WadWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write header, directory entries and payloads at the offsets the
    /// model already carries.  Gaps between regions are zero-filled by the
    /// underlying stream.
    pub fn write(&mut self, wad: &Wad) -> Result<()> {
        let header = wad.header();
        if header.directory_offset < 0 {
            return Err(WadError::corrupt(format!(
                "negative directory offset {}",
                header.directory_offset
            )));
        }

        self.writer.seek(SeekFrom::Start(0))?;
        header.write(&mut self.writer)?;

        for (index, lump) in wad.lumps().iter().enumerate() {
            let desc = &lump.descriptor;
            if desc.length as usize != lump.data.len() {
                return Err(WadError::corrupt(format!(
                    "lump {index} ({}) declares {} bytes but holds {}",
                    desc.name,
                    desc.length,
                    lump.data.len()
                )));
            }

            let slot = header.directory_offset as u64 + (index * DESCRIPTOR_SIZE) as u64;
            self.writer.seek(SeekFrom::Start(slot))?;
            desc.write(&mut self.writer)?;

            if !lump.data.is_empty() {
                if desc.data_offset < 0 {
                    return Err(WadError::corrupt(format!(
                        "lump {index} ({}) has negative offset {}",
                        desc.name, desc.data_offset
                    )));
                }
                self.writer.seek(SeekFrom::Start(desc.data_offset as u64))?;
                self.writer.write_all(&lump.data)?;
            }
        }

        self.writer.flush()?;
        debug!(
            tag = %header.tag_lossy(),
            lumps = header.lump_count,
            directory_offset = header.directory_offset,
            "wrote WAD"
        );
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
