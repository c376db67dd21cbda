use std::path::PathBuf;

use miette::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Cannot open archive `{}`", .path.display())]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read archive `{}`", .path.display())]
    #[diagnostic(help("Is this a BSD ar archive?"))]
    ReadArchive {
        path: PathBuf,
        #[source]
        source: ar_format::FormatError,
    },

    #[error("Cannot read package `{}`", .path.display())]
    #[diagnostic(help("Is this a Debian binary package?"))]
    ReadPackage {
        path: PathBuf,
        #[source]
        source: ar_format::deb::DebError,
    },

    #[error("Cannot open file `{}`", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot add file to archive `{}`", .path.display())]
    AddFile {
        path: PathBuf,
        #[source]
        source: ar_format::WriteError,
    },

    #[error("Cannot create archive `{}`", .path.display())]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot process file `{}`", .path.display())]
    ProcessFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File `{}` has no usable file name", .path.display())]
    NoFileName { path: PathBuf },

    #[error("Refusing to extract member `{name}`")]
    #[diagnostic(help("Member names must not contain path separators or `..`"))]
    UnsafeMemberName { name: String },

    #[error("Member `{name}` not found in archive")]
    MemberNotFound { name: String },

    #[error("Cannot serialize listing")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("Archive already exists: `{}`", path.display())]
    #[diagnostic(help("Use -f/--force to overwrite"))]
    ArchiveExists { path: PathBuf },

    #[error("No files specified to add to archive")]
    #[diagnostic(help("Specify one or more files to archive"))]
    NoFilesSpecified,
}
