//! Sync (std) frontends for reading and writing archives.

#[cfg(feature = "reader")]
mod reader;
#[cfg(all(test, feature = "writer"))]
mod tests;
#[cfg(feature = "writer")]
mod writer;

#[cfg(feature = "reader")]
pub use reader::MappedArchive;
