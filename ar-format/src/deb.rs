//! Member layout of Debian binary packages.
//!
//! A `.deb` is an archive holding, in this order, `debian-binary`, the compressed
//! control tarball and the compressed data tarball. Building and reading the tarballs
//! themselves is left to the caller.

use std::borrow::Cow;

use crate::error::WriteError;
use crate::file::reader::ArchiveReader;
use crate::file::writer::{ArchiveWriter, WriterOptions};

pub const DEBIAN_BINARY: &str = "debian-binary";
pub const CONTROL_TAR_GZ: &str = "control.tar.gz";
pub const DATA_TAR_GZ: &str = "data.tar.gz";

/// Contents of the `debian-binary` member.
pub const FORMAT_VERSION: &[u8] = b"2.0\n";

/// Mode dpkg-deb records for package members.
pub const MEMBER_MODE: u32 = 0o100644;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DebError {
    #[error("Package is missing its `{0}` member.")]
    MissingMember(&'static str),

    #[error("Member {index} is `{found}`, expected `{expected}`.")]
    UnexpectedMember {
        index: usize,
        found: String,
        expected: &'static str,
    },

    #[error("Unsupported package format version {0:?}.")]
    UnsupportedVersion(String),
}

/// The two tarballs of a package, already compressed.
#[derive(Debug, Clone, Copy)]
pub struct DebPackage<'a> {
    pub control: &'a [u8],
    pub data: &'a [u8],
}

impl<'a> DebPackage<'a> {
    pub fn new(control: &'a [u8], data: &'a [u8]) -> DebPackage<'a> {
        DebPackage { control, data }
    }

    /// Default options for package members: root owned, mode `100644`.
    pub fn writer_options() -> WriterOptions {
        WriterOptions {
            mode: MEMBER_MODE,
            ..WriterOptions::default()
        }
    }

    /// A finalized writer holding the three package members.
    pub fn writer(&self, options: WriterOptions) -> Result<ArchiveWriter, WriteError> {
        let mut writer = ArchiveWriter::with_options(options);
        writer
            .add(FORMAT_VERSION, DEBIAN_BINARY)?
            .add(self.control, CONTROL_TAR_GZ)?
            .add(self.data, DATA_TAR_GZ)?;
        writer.finalize();

        tracing::debug!(
            control = self.control.len(),
            data = self.data.len(),
            "assembled debian package"
        );
        Ok(writer)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, WriteError> {
        Ok(self.writer(Self::writer_options())?.finish())
    }
}

/// The members of a package, borrowed from its archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebMembers<'a> {
    pub version: &'a [u8],
    pub control: &'a [u8],
    pub control_name: Cow<'a, str>,
    pub data: &'a [u8],
    pub data_name: Cow<'a, str>,
}

impl<'a> DebMembers<'a> {
    /// Check the member order of a package and pick out its parts.
    ///
    /// Control and data tarballs may use any compression suffix (`control.tar.xz`,
    /// `data.tar.zst`, ...).
    pub fn from_reader(reader: &ArchiveReader<'a>) -> Result<DebMembers<'a>, DebError> {
        let records = reader.records();

        let version = records
            .first()
            .ok_or(DebError::MissingMember(DEBIAN_BINARY))?;
        expect_name(0, version.name_bytes().as_ref(), DEBIAN_BINARY, |n| {
            n == DEBIAN_BINARY.as_bytes()
        })?;
        let version_text = version.content();
        if !version_text.starts_with(b"2.") {
            return Err(DebError::UnsupportedVersion(
                String::from_utf8_lossy(version_text).trim_end().to_string(),
            ));
        }

        let control = records
            .get(1)
            .ok_or(DebError::MissingMember(CONTROL_TAR_GZ))?;
        let control_name = control.name();
        expect_name(1, control_name.as_bytes(), CONTROL_TAR_GZ, |n| {
            n.starts_with(b"control.tar")
        })?;

        let data = records
            .get(2)
            .ok_or(DebError::MissingMember(DATA_TAR_GZ))?;
        let data_name = data.name();
        expect_name(2, data_name.as_bytes(), DATA_TAR_GZ, |n| {
            n.starts_with(b"data.tar")
        })?;

        Ok(DebMembers {
            version: version_text,
            control: control.content(),
            control_name,
            data: data.content(),
            data_name,
        })
    }
}

fn expect_name<F>(index: usize, found: &[u8], expected: &'static str, ok: F) -> Result<(), DebError>
where
    F: Fn(&[u8]) -> bool,
{
    if ok(found) {
        Ok(())
    } else {
        Err(DebError::UnexpectedMember {
            index,
            found: String::from_utf8_lossy(found).into_owned(),
            expected,
        })
    }
}
