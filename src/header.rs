use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{self, Read, Write};

/// Size of the on-disk header: tag, lump count, directory offset.
pub const HEADER_SIZE: usize = 12;

/// Tag of a primary (complete) archive.
pub const IWAD: [u8; 4] = *b"IWAD";
/// Tag of a patch archive layered over a primary one.
pub const PWAD: [u8; 4] = *b"PWAD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadHeader {
    /// Four ASCII bytes, not NUL-terminated.  Never validated on read.
    pub tag:              [u8; 4],
    pub lump_count:       i32,
    pub directory_offset: i32,
}

impl WadHeader {
    pub fn is_iwad(&self) -> bool {
        self.tag == IWAD
    }

    pub fn is_pwad(&self) -> bool {
        self.tag == PWAD
    }

    pub fn tag_lossy(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.tag)?;
        writer.write_i32::<LittleEndian>(self.lump_count)?;
        writer.write_i32::<LittleEndian>(self.directory_offset)?;
        Ok(())
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut tag = [0u8; 4];
        reader.read_exact(&mut tag)?;
        let lump_count = reader.read_i32::<LittleEndian>()?;
        let directory_offset = reader.read_i32::<LittleEndian>()?;
        Ok(Self {
            tag,
            lump_count,
            directory_offset,
        })
    }
}

impl fmt::Display for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} lumps, directory at {})",
            self.tag_lossy(),
            self.lump_count,
            self.directory_offset
        )
    }
}
