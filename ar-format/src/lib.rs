//! Reader and writer for the Unix `ar` archive format, BSD variant.
//!
//! Use [ArchiveReader][ArchiveReader] to enumerate the members of an archive held in memory,
//! and [ArchiveWriter][ArchiveWriter] to produce one as a drained byte stream.
//!
//! ```
//! use ar_format::{ArchiveReader, ArchiveWriter};
//!
//! let mut writer = ArchiveWriter::new();
//! writer.add(b"hello", "hello.txt")?.add(b"world", "world.txt")?;
//! let bytes = writer.finish();
//!
//! let reader = ArchiveReader::new(&bytes)?;
//! assert_eq!(reader.len(), 2);
//! assert_eq!(reader.records()[0].name(), "hello.txt");
//! assert_eq!(reader.records()[1].content(), b"world");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(feature = "tokio")]
pub mod aio;
#[cfg(feature = "writer")]
pub mod deb;
mod error;
#[cfg(feature = "reader")]
mod file;
pub mod header;
pub mod parse;
#[cfg(feature = "reader")]
mod record;
pub mod sync;

pub use error::{FormatError, WriteError};
#[cfg(feature = "reader")]
pub use file::reader::{records, ArchiveReader, Records};
#[cfg(feature = "writer")]
pub use file::writer::{ArchiveWriter, Drained, EntryOptions, OverflowPolicy, WriterOptions};
pub use header::{Field, MAGIC};
#[cfg(feature = "reader")]
pub use record::Record;
#[cfg(feature = "reader")]
pub use sync::MappedArchive;
