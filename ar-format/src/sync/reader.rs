use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::FormatError;
use crate::file::reader::ArchiveReader;

/// An archive file mapped into memory.
///
/// Record contents handed out by [reader](MappedArchive::reader) borrow the mapping
/// directly.
#[derive(Debug)]
pub struct MappedArchive {
    path: PathBuf,
    mmap: Option<Mmap>,
}

impl MappedArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<MappedArchive> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();

        // Zero-length files cannot be mapped on every platform.
        let mmap = if len == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(&file)? })
        };

        tracing::debug!(path = %path.as_ref().display(), len, "mapped archive");

        Ok(MappedArchive {
            path: path.as_ref().to_path_buf(),
            mmap,
        })
    }

    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn reader(&self) -> Result<ArchiveReader<'_>, FormatError> {
        ArchiveReader::new(self.as_bytes())
    }
}
