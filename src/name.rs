//! Fixed-width lump names.
//!
//! A lump name occupies exactly [`LUMP_NAME_LEN`] bytes on disk.  Shorter
//! names are NUL-padded on the right; an 8-character name has no terminator
//! at all.  Every comparison here works on the bytes before the first NUL
//! *inside* the 8-byte window and never looks past it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::error::{Result, WadError};

/// Width of the on-disk name field.
pub const LUMP_NAME_LEN: usize = 8;

/// Name of the first lump following a map's header lump.
pub const MAP_MARKER: LumpName = LumpName(*b"THINGS\0\0");

#[derive(Clone, Copy)]
pub struct LumpName([u8; LUMP_NAME_LEN]);

impl LumpName {
    /// Build a name from an ASCII string of at most 8 bytes.
    pub fn new(name: &str) -> Result<Self> {
        let bytes = name.as_bytes();
        if bytes.len() > LUMP_NAME_LEN {
            return Err(WadError::InvalidName(format!(
                "{name:?} is {} bytes, limit is {LUMP_NAME_LEN}",
                bytes.len()
            )));
        }
        if !name.is_ascii() || bytes.contains(&0) {
            return Err(WadError::InvalidName(format!("{name:?} is not plain ASCII")));
        }
        let mut raw = [0u8; LUMP_NAME_LEN];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    /// Wrap the raw field exactly as it was stored.  Bytes after the first
    /// NUL are kept so the field re-serializes unchanged.
    pub fn from_raw(raw: [u8; LUMP_NAME_LEN]) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &[u8; LUMP_NAME_LEN] {
        &self.0
    }

    /// The significant bytes: everything before the first NUL, at most 8.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(LUMP_NAME_LEN);
        &self.0[..end]
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Lossy text form; non-ASCII bytes become U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl PartialEq for LumpName {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for LumpName {}

impl PartialOrd for LumpName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LumpName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for LumpName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialEq<str> for LumpName {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for LumpName {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_lossy())
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumpName({:?})", self.to_string_lossy())
    }
}

impl TryFrom<&str> for LumpName {
    type Error = WadError;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

impl Serialize for LumpName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_nul_padded() {
        let name = LumpName::new("E1M1").unwrap();
        assert_eq!(name.raw(), b"E1M1\0\0\0\0");
        assert_eq!(name.len(), 4);
        assert_eq!(name, "E1M1");
    }

    #[test]
    fn full_width_name_has_no_terminator() {
        let name = LumpName::new("LINEDEFS").unwrap();
        assert_eq!(name.raw(), b"LINEDEFS");
        assert_eq!(name.as_bytes(), b"LINEDEFS");
        assert_ne!(name, MAP_MARKER);
    }

    #[test]
    fn rejects_long_and_non_ascii_names() {
        assert!(matches!(LumpName::new("TOOLONGNAME"), Err(WadError::InvalidName(_))));
        assert!(matches!(LumpName::new("MAPÄ"), Err(WadError::InvalidName(_))));
        assert!(matches!(LumpName::new("A\0B"), Err(WadError::InvalidName(_))));
    }

    #[test]
    fn bytes_after_terminator_are_ignored_by_eq() {
        let dirty = LumpName::from_raw(*b"THINGS\0X");
        assert_eq!(dirty, MAP_MARKER);
        // raw field is preserved for writing
        assert_eq!(dirty.raw()[7], b'X');
    }

    #[test]
    fn display_pads_like_str() {
        let name = LumpName::new("MAP01").unwrap();
        assert_eq!(format!("{name:<8}|"), "MAP01   |");
        assert_eq!(name.to_string(), "MAP01");
    }

    #[test]
    fn ordering_uses_significant_bytes() {
        let a = LumpName::new("A").unwrap();
        let b = LumpName::from_raw(*b"B\0ZZZZZZ");
        assert!(a < b);
    }
}
