use std::collections::VecDeque;
use std::task::Waker;

use crate::error::WriteError;
use crate::header::{padding, Field, RawHeader, BSD_NAME_PREFIX, MAGIC, PAD_BYTE};

/// What to do with a header value that does not fit its field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail the `add` call with [WriteError::FieldOverflow].
    #[default]
    Reject,
    /// Keep the leading bytes that fit, as legacy writers do.
    Truncate,
}

/// Defaults applied to every entry that does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    pub uid: u32,
    pub gid: u32,
    pub mode: u32,
    /// Seconds since the Unix epoch.
    pub mtime: u64,
    pub overflow: OverflowPolicy,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            uid: 0,
            gid: 0,
            mode: 0o644,
            mtime: 0,
            overflow: OverflowPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOptions {
    pub name: String,
    pub mode: Option<u32>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub mtime: Option<u64>,
}

impl EntryOptions {
    pub fn new<S: Into<String>>(name: S) -> EntryOptions {
        EntryOptions {
            name: name.into(),
            mode: None,
            uid: None,
            gid: None,
            mtime: None,
        }
    }

    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    pub fn gid(mut self, gid: u32) -> Self {
        self.gid = Some(gid);
        self
    }

    pub fn mtime(mut self, mtime: u64) -> Self {
        self.mtime = Some(mtime);
        self
    }
}

impl From<&str> for EntryOptions {
    fn from(name: &str) -> Self {
        EntryOptions::new(name)
    }
}

impl From<String> for EntryOptions {
    fn from(name: String) -> Self {
        EntryOptions::new(name)
    }
}

/// Result of a [ArchiveWriter::drain] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drained {
    /// Everything that was queued.
    Chunk(Vec<u8>),
    /// Nothing queued yet; more entries may still be added.
    Pending,
    /// Finalized and fully drained.
    Finished,
}

/// Builds an archive in memory as a queue of encoded members.
///
/// Entries are encoded as they are added. The queued bytes are handed out by
/// [drain](ArchiveWriter::drain), or through the `std::io::Read` and
/// `tokio::io::AsyncRead` implementations, until the writer is finalized and empty.
#[derive(Debug)]
pub struct ArchiveWriter {
    options: WriterOptions,
    queue: VecDeque<Vec<u8>>,
    /// Bytes of the front chunk already handed out.
    consumed: usize,
    entries: usize,
    finalized: bool,
    pub(crate) waker: Option<Waker>,
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        ArchiveWriter::new()
    }
}

impl ArchiveWriter {
    pub fn new() -> ArchiveWriter {
        ArchiveWriter::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> ArchiveWriter {
        let mut queue = VecDeque::new();
        queue.push_back(MAGIC.to_vec());

        ArchiveWriter {
            options,
            queue,
            consumed: 0,
            entries: 0,
            finalized: false,
            waker: None,
        }
    }

    #[inline(always)]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Number of entries added so far.
    #[inline(always)]
    pub fn entries(&self) -> usize {
        self.entries
    }

    #[inline(always)]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Bytes waiting to be drained.
    pub fn queued_len(&self) -> usize {
        self.queue.iter().map(Vec::len).sum::<usize>() - self.consumed
    }

    /// Encode `content` as the next member of the archive.
    pub fn add<C, E>(&mut self, content: C, entry: E) -> Result<&mut Self, WriteError>
    where
        C: AsRef<[u8]>,
        E: Into<EntryOptions>,
    {
        if self.finalized {
            return Err(WriteError::Finalized);
        }

        let content = content.as_ref();
        let entry = entry.into();
        let name = entry.name.as_bytes();
        if name.is_empty() || name.contains(&0) {
            return Err(WriteError::InvalidName(entry.name));
        }

        let policy = self.options.overflow;
        let mut header = RawHeader::new();

        let appended_name = if needs_extended_name(name) {
            let marker = format!("#1/{}", name.len());
            header.set(Field::Name, marker.as_bytes(), OverflowPolicy::Reject)?;
            name
        } else {
            header.set(Field::Name, name, OverflowPolicy::Reject)?;
            &[][..]
        };

        let section_len = (appended_name.len() + content.len()) as u64;
        header.set_decimal(Field::Mtime, entry.mtime.unwrap_or(self.options.mtime), policy)?;
        header.set_decimal(Field::Uid, entry.uid.unwrap_or(self.options.uid).into(), policy)?;
        header.set_decimal(Field::Gid, entry.gid.unwrap_or(self.options.gid).into(), policy)?;
        header.set_octal(Field::Mode, entry.mode.unwrap_or(self.options.mode), policy)?;
        // A truncated size would desynchronise every following member.
        header.set_decimal(Field::Size, section_len, OverflowPolicy::Reject)?;

        let pad = padding(section_len) as usize;
        let mut chunk = Vec::with_capacity(header.as_bytes().len() + section_len as usize + pad);
        chunk.extend_from_slice(header.as_bytes());
        chunk.extend_from_slice(appended_name);
        chunk.extend_from_slice(content);
        if pad > 0 {
            chunk.push(PAD_BYTE);
        }

        tracing::trace!(
            name = %entry.name,
            size = content.len(),
            extended = !appended_name.is_empty(),
            "queued entry"
        );

        self.queue.push_back(chunk);
        self.entries += 1;
        self.wake();
        Ok(self)
    }

    /// Signal that no more entries will be added.
    pub fn finalize(&mut self) {
        if !self.finalized {
            tracing::debug!(entries = self.entries, "finalized archive");
        }
        self.finalized = true;
        self.wake();
    }

    /// Take everything currently queued.
    pub fn drain(&mut self) -> Drained {
        if self.queue.is_empty() {
            return if self.finalized {
                Drained::Finished
            } else {
                Drained::Pending
            };
        }

        let mut out = Vec::with_capacity(self.queued_len());
        while let Some(chunk) = self.queue.pop_front() {
            out.extend_from_slice(&chunk[self.consumed..]);
            self.consumed = 0;
        }
        Drained::Chunk(out)
    }

    /// Finalize and return the complete archive.
    pub fn finish(mut self) -> Vec<u8> {
        self.finalize();
        match self.drain() {
            Drained::Chunk(bytes) => bytes,
            Drained::Pending | Drained::Finished => Vec::new(),
        }
    }

    /// Copy queued bytes into `buf`, returning how many were copied.
    pub(crate) fn read_queued(&mut self, buf: &mut [u8]) -> usize {
        let mut written = 0;
        while written < buf.len() {
            let Some(front) = self.queue.front() else {
                break;
            };
            let available = &front[self.consumed..];
            let n = available.len().min(buf.len() - written);
            buf[written..written + n].copy_from_slice(&available[..n]);
            written += n;
            self.consumed += n;

            if self.consumed == front.len() {
                self.queue.pop_front();
                self.consumed = 0;
            }
        }
        written
    }

    #[inline(always)]
    pub(crate) fn has_queued(&self) -> bool {
        !self.queue.is_empty()
    }

    fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }
}

/// Names that cannot be stored in the 16 byte field as-is.
fn needs_extended_name(name: &[u8]) -> bool {
    name.len() > Field::Name.width() || name.contains(&b' ') || name.starts_with(BSD_NAME_PREFIX)
}
