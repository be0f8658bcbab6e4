pub mod checksum;
pub mod naming;
pub mod scan;

pub use naming::{archive_name, ArchiveFormat, ArtifactNameError};
pub use scan::{scan, scan_with_suffix, sorted_static_libraries, ArtifactError, StaticLibraries};
