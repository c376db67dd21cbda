//! Sans-IO parsing primitives for member headers.
//!
//! These functions work on byte slices only; the record offset is carried along so
//! errors can point at the offending member.

use crate::error::FormatError;
use crate::header::{Field, BSD_NAME_PREFIX};

/// Parse a space-padded ASCII number using the radix of `field`.
///
/// An owner or group field made up entirely of spaces reads as zero, which is what
/// MS and GNU tools emit for special members. Any other blank field is invalid.
pub fn parse_number(field: Field, bytes: &[u8], offset: usize) -> Result<u64, FormatError> {
    let invalid = || FormatError::InvalidField {
        field,
        offset,
        value: String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = std::str::from_utf8(bytes).map_err(|_| invalid())?;
    let trimmed = text.trim_matches(' ');
    if trimmed.is_empty() {
        return match field {
            Field::Uid | Field::Gid => Ok(0),
            _ => Err(invalid()),
        };
    }

    // from_str_radix accepts a leading sign, the header format does not.
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    u64::from_str_radix(trimmed, field.radix()).map_err(|_| invalid())
}

/// Length of a BSD extended name, if the name field declares one.
///
/// A declared length of zero is invalid.
pub fn parse_bsd_name_len(name_field: &[u8], offset: usize) -> Result<Option<u64>, FormatError> {
    match name_field.strip_prefix(BSD_NAME_PREFIX.as_slice()) {
        Some(digits) => {
            let len = std::str::from_utf8(digits)
                .ok()
                .map(|s| s.trim_end_matches(' '))
                .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|len| *len > 0)
                .ok_or_else(|| FormatError::InvalidField {
                    field: Field::Name,
                    offset,
                    value: String::from_utf8_lossy(name_field).into_owned(),
                })?;
            Ok(Some(len))
        }
        None => Ok(None),
    }
}

/// Strip the space padding of a plain name field.
#[inline]
pub fn trim_name(name_field: &[u8]) -> &[u8] {
    let end = name_field
        .iter()
        .rposition(|b| *b != b' ')
        .map(|i| i + 1)
        .unwrap_or(0);
    &name_field[..end]
}
