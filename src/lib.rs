pub mod error;
pub mod name;
pub mod header;
pub mod lump;
pub mod list;
pub mod layout;
pub mod io_stream;
pub mod archive;
pub mod combine;
pub mod query;

pub use error::{Result, WadError};
pub use name::{LumpName, MAP_MARKER};
pub use header::{WadHeader, IWAD, PWAD};
pub use lump::{LumpBundle, LumpDescriptor};
pub use list::OwningList;
pub use archive::Wad;
pub use combine::{combine, combine_paths, CombineOptions};
pub use query::{lump_names, lump_names_at, map_names, map_names_at};
