use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crate::name::{LumpName, LUMP_NAME_LEN};

/// Size of one directory record: offset, length, name.
pub const DESCRIPTOR_SIZE: usize = 16;

/// One directory entry.  `data_offset` is relative to the start of the
/// stream the entry was read from and goes stale once the lump is moved
/// into another archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumpDescriptor {
    pub data_offset: i32,
    pub length:      i32,
    pub name:        LumpName,
}

impl LumpDescriptor {
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.data_offset)?;
        writer.write_i32::<LittleEndian>(self.length)?;
        writer.write_all(self.name.raw())?;
        Ok(())
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let data_offset = reader.read_i32::<LittleEndian>()?;
        let length = reader.read_i32::<LittleEndian>()?;
        let mut name = [0u8; LUMP_NAME_LEN];
        reader.read_exact(&mut name)?;
        Ok(Self {
            data_offset,
            length,
            name: LumpName::from_raw(name),
        })
    }

    /// End of the payload in the source stream, widened so it cannot overflow.
    pub fn data_end(&self) -> i64 {
        self.data_offset as i64 + self.length as i64
    }
}

/// A directory entry together with the payload it describes.
/// `data.len()` always equals `descriptor.length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumpBundle {
    pub descriptor: LumpDescriptor,
    pub data:       Vec<u8>,
}

impl LumpBundle {
    pub fn name(&self) -> LumpName {
        self.descriptor.name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
