use std::fmt;
use std::ops::Range;

/// Every archive starts with these bytes.
pub const MAGIC: &[u8; 8] = b"!<arch>\n";

/// Size of the fixed per-member header.
pub const HEADER_LEN: usize = 60;

/// Trailer closing every member header.
pub const END_MARKER: &[u8; 2] = b"`\n";

/// A name field starting with this marker holds the length of a name stored after the header.
pub const BSD_NAME_PREFIX: &[u8; 3] = b"#1/";

/// Filler appended after odd-length members.
pub const PAD_BYTE: u8 = b'\n';

/// A fixed-width field of the member header.
///
/// ```text
/// char ar_name[16];  member name
/// char ar_date[12];  modification time, decimal
/// char ar_uid[6];    user id, decimal
/// char ar_gid[6];    group id, decimal
/// char ar_mode[8];   file mode, octal
/// char ar_size[10];  content size, decimal
/// char ar_fmag[2];   "`\n"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Mtime,
    Uid,
    Gid,
    Mode,
    Size,
    EndMarker,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Mtime,
        Field::Uid,
        Field::Gid,
        Field::Mode,
        Field::Size,
        Field::EndMarker,
    ];

    /// Byte range of the field within the header.
    pub const fn range(self) -> Range<usize> {
        match self {
            Field::Name => 0..16,
            Field::Mtime => 16..28,
            Field::Uid => 28..34,
            Field::Gid => 34..40,
            Field::Mode => 40..48,
            Field::Size => 48..58,
            Field::EndMarker => 58..60,
        }
    }

    pub const fn width(self) -> usize {
        let range = self.range();
        range.end - range.start
    }

    /// Numeric base of the field's ASCII representation.
    pub const fn radix(self) -> u32 {
        match self {
            Field::Mode => 8,
            _ => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Mtime => "timestamp",
            Field::Uid => "owner ID",
            Field::Gid => "group ID",
            Field::Mode => "mode",
            Field::Size => "size",
            Field::EndMarker => "end marker",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of bytes needed after `len` bytes to reach an even boundary.
#[inline(always)]
pub const fn padding(len: u64) -> u64 {
    len % 2
}

#[cfg(feature = "writer")]
pub(crate) use self::raw::RawHeader;

#[cfg(feature = "writer")]
mod raw {
    use super::{Field, END_MARKER, HEADER_LEN};
    use crate::error::WriteError;
    use crate::file::writer::OverflowPolicy;

    /// A member header under construction: spaces everywhere, end marker in place.
    pub(crate) struct RawHeader([u8; HEADER_LEN]);

    impl RawHeader {
        pub(crate) fn new() -> RawHeader {
            let mut bytes = [b' '; HEADER_LEN];
            bytes[Field::EndMarker.range()].copy_from_slice(END_MARKER);
            RawHeader(bytes)
        }

        /// Left-justify `value` into `field`.
        pub(crate) fn set(
            &mut self,
            field: Field,
            value: &[u8],
            policy: OverflowPolicy,
        ) -> Result<(), WriteError> {
            let width = field.width();
            let value = if value.len() > width {
                match policy {
                    OverflowPolicy::Reject => {
                        return Err(WriteError::FieldOverflow {
                            field,
                            value: String::from_utf8_lossy(value).into_owned(),
                            width,
                        })
                    }
                    OverflowPolicy::Truncate => {
                        tracing::warn!(
                            %field,
                            value = %String::from_utf8_lossy(value),
                            width,
                            "truncating header field"
                        );
                        &value[..width]
                    }
                }
            } else {
                value
            };

            let start = field.range().start;
            self.0[start..start + value.len()].copy_from_slice(value);
            Ok(())
        }

        pub(crate) fn set_decimal(
            &mut self,
            field: Field,
            value: u64,
            policy: OverflowPolicy,
        ) -> Result<(), WriteError> {
            self.set(field, value.to_string().as_bytes(), policy)
        }

        pub(crate) fn set_octal(
            &mut self,
            field: Field,
            value: u32,
            policy: OverflowPolicy,
        ) -> Result<(), WriteError> {
            self.set(field, format!("{:o}", value).as_bytes(), policy)
        }

        pub(crate) fn as_bytes(&self) -> &[u8; HEADER_LEN] {
            &self.0
        }
    }

}
