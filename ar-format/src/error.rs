use crate::header::Field;

/// The archive bytes do not form a valid `ar` archive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Missing magic header `!<arch>\\n`. Is this an ar archive?")]
    MissingMagic,

    #[error("Record at offset {offset:#x} is truncated (needs {needed} bytes, {available} available).")]
    Truncated {
        offset: usize,
        needed: u64,
        available: usize,
    },

    #[error("Record at offset {offset:#x} is missing its header trailer; found {found:?} instead.")]
    InvalidEndMarker { offset: usize, found: [u8; 2] },

    #[error("Invalid {field} field in record at offset {offset:#x} ({value:?}).")]
    InvalidField {
        field: Field,
        offset: usize,
        value: String,
    },

    #[error("Extended name of {name_len} bytes exceeds the record size of {size} bytes at offset {offset:#x}.")]
    InvalidNameLength {
        offset: usize,
        name_len: u64,
        size: u64,
    },
}

/// An entry could not be added to an archive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("Value {value:?} does not fit the {width} byte {field} field.")]
    FieldOverflow {
        field: Field,
        value: String,
        width: usize,
    },

    #[error("Invalid member name {0:?}.")]
    InvalidName(String),

    #[error("The archive has been finalized; no more entries can be added.")]
    Finalized,
}

impl From<FormatError> for std::io::Error {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::Truncated { .. } => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, e)
            }
            _ => std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    }
}

impl From<WriteError> for std::io::Error {
    fn from(e: WriteError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    }
}
