use std::io::{ErrorKind, Read, Write};

use crate::file::writer::{ArchiveWriter, Drained};

/// Reads drain the queue. An empty queue on a writer that has not been finalized
/// reports `WouldBlock`; end of file is only reached after `finalize`.
impl Read for ArchiveWriter {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if !self.has_queued() {
            return if self.is_finalized() {
                Ok(0)
            } else {
                Err(std::io::Error::new(
                    ErrorKind::WouldBlock,
                    "no archive data queued yet",
                ))
            };
        }

        Ok(self.read_queued(buf))
    }
}

impl ArchiveWriter {
    /// Write everything currently queued to `sink`, returning the number of bytes written.
    pub fn write_to<W: Write>(&mut self, mut sink: W) -> std::io::Result<u64> {
        match self.drain() {
            Drained::Chunk(bytes) => {
                sink.write_all(&bytes)?;
                Ok(bytes.len() as u64)
            }
            Drained::Pending | Drained::Finished => Ok(0),
        }
    }
}
