use std::borrow::Cow;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::FormatError;
use crate::header::{padding, Field, END_MARKER, HEADER_LEN};
use crate::parse::{parse_bsd_name_len, parse_number, trim_name};

/// A view over one archive member.
///
/// Structural checks (header length, trailer, size, extended name length) are done
/// when the view is created. The remaining numeric fields are decoded on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    offset: usize,
    header: &'a [u8],
    /// Declared content section: the appended BSD name followed by the content.
    section: &'a [u8],
    name_len: usize,
}

impl<'a> Record<'a> {
    /// Parse the member starting at `offset` in `data`.
    pub(crate) fn parse(data: &'a [u8], offset: usize) -> Result<Record<'a>, FormatError> {
        let rest = &data[offset..];
        if rest.len() < HEADER_LEN {
            return Err(FormatError::Truncated {
                offset,
                needed: HEADER_LEN as u64,
                available: rest.len(),
            });
        }

        let header = &rest[..HEADER_LEN];
        let end_marker = &header[Field::EndMarker.range()];
        if end_marker != END_MARKER {
            return Err(FormatError::InvalidEndMarker {
                offset,
                found: [end_marker[0], end_marker[1]],
            });
        }

        let size = parse_number(Field::Size, &header[Field::Size.range()], offset)?;
        let available = rest.len() - HEADER_LEN;
        if size > available as u64 {
            return Err(FormatError::Truncated {
                offset,
                needed: HEADER_LEN as u64 + size,
                available: rest.len(),
            });
        }
        let section = &rest[HEADER_LEN..HEADER_LEN + size as usize];

        let name_len = match parse_bsd_name_len(&header[Field::Name.range()], offset)? {
            Some(len) if len > size => {
                return Err(FormatError::InvalidNameLength {
                    offset,
                    name_len: len,
                    size,
                })
            }
            Some(len) => len as usize,
            None => 0,
        };

        let record = Record {
            offset,
            header,
            section,
            name_len,
        };
        tracing::trace!(
            offset = format_args!("{:#x}", offset),
            size,
            name = %record.name(),
            "parsed record"
        );
        Ok(record)
    }

    /// Offset of the member header from the start of the archive.
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn is_extended_name(&self) -> bool {
        self.name_len > 0
    }

    /// Raw member name.
    ///
    /// Extended names have their NUL padding removed; plain names their trailing spaces.
    pub fn name_bytes(&self) -> Cow<'a, [u8]> {
        if self.is_extended_name() {
            let raw = &self.section[..self.name_len];
            if raw.contains(&0) {
                Cow::Owned(raw.iter().copied().filter(|b| *b != 0).collect())
            } else {
                Cow::Borrowed(raw)
            }
        } else {
            Cow::Borrowed(trim_name(&self.header[Field::Name.range()]))
        }
    }

    /// Member name, with invalid UTF-8 replaced.
    pub fn name(&self) -> Cow<'a, str> {
        match self.name_bytes() {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }

    /// Modification time in seconds since the Unix epoch.
    pub fn mtime(&self) -> Result<u64, FormatError> {
        self.number(Field::Mtime)
    }

    pub fn modified(&self) -> Result<SystemTime, FormatError> {
        self.mtime().map(|secs| UNIX_EPOCH + Duration::from_secs(secs))
    }

    pub fn uid(&self) -> Result<u32, FormatError> {
        self.number_u32(Field::Uid)
    }

    pub fn gid(&self) -> Result<u32, FormatError> {
        self.number_u32(Field::Gid)
    }

    pub fn mode(&self) -> Result<u32, FormatError> {
        self.number_u32(Field::Mode)
    }

    /// Size of the content, not counting an appended extended name.
    #[inline(always)]
    pub fn size(&self) -> u64 {
        (self.section.len() - self.name_len) as u64
    }

    /// Value of the size field, which counts an appended extended name.
    #[inline(always)]
    pub fn declared_size(&self) -> u64 {
        self.section.len() as u64
    }

    /// Header plus appended extended name.
    #[inline(always)]
    pub fn header_size(&self) -> usize {
        HEADER_LEN + self.name_len
    }

    #[inline(always)]
    pub fn padding(&self) -> usize {
        padding(self.declared_size()) as usize
    }

    /// Bytes the member occupies in the archive, padding included.
    #[inline(always)]
    pub fn total_size(&self) -> usize {
        HEADER_LEN + self.section.len() + self.padding()
    }

    pub fn end_marker(&self) -> &'a [u8] {
        &self.header[Field::EndMarker.range()]
    }

    /// The member's content, borrowed from the archive buffer.
    #[inline(always)]
    pub fn content(&self) -> &'a [u8] {
        &self.section[self.name_len..]
    }

    /// Decode every numeric field, reporting the first one that is malformed.
    pub fn validate(&self) -> Result<(), FormatError> {
        self.mtime()?;
        self.uid()?;
        self.gid()?;
        self.mode()?;
        Ok(())
    }

    fn number(&self, field: Field) -> Result<u64, FormatError> {
        parse_number(field, &self.header[field.range()], self.offset)
    }

    fn number_u32(&self, field: Field) -> Result<u32, FormatError> {
        let value = self.number(field)?;
        u32::try_from(value).map_err(|_| FormatError::InvalidField {
            field,
            offset: self.offset,
            value: String::from_utf8_lossy(&self.header[field.range()]).into_owned(),
        })
    }
}
