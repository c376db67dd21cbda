use std::path::Path;

use ar_format::deb::{DebMembers, DebPackage};
use ar_format::{ArchiveReader, ArchiveWriter, WriterOptions};

use crate::cli::DebArgs;
use crate::commands::create::write_archive;
use crate::error::{Error, Result};
use crate::util::format_size;

pub async fn run(args: DebArgs) -> Result<()> {
    if !args.force && tokio::fs::try_exists(&args.output).await.unwrap_or(false) {
        return Err(Error::ArchiveExists { path: args.output });
    }

    let control = read(&args.control).await?;
    let data = read(&args.data).await?;

    let package = DebPackage::new(&control, &data);
    let mut writer = assemble(&package, DebPackage::writer_options(), &args.output)?;

    let mut file = tokio::fs::File::create(&args.output)
        .await
        .map_err(|source| Error::CreateArchive {
            path: args.output.clone(),
            source,
        })?;
    write_archive(&mut writer, &mut file)
        .await
        .map_err(|source| Error::CreateArchive {
            path: args.output.clone(),
            source,
        })?;
    drop(file);

    // Read the package back so a broken layout is reported here rather than by dpkg.
    let bytes = read(&args.output).await?;
    let reader = ArchiveReader::new(&bytes).map_err(|source| Error::ReadArchive {
        path: args.output.clone(),
        source,
    })?;
    let members = DebMembers::from_reader(&reader).map_err(|source| Error::ReadPackage {
        path: args.output.clone(),
        source,
    })?;

    println!(
        "Created {} ({} control, {} data)",
        args.output.display(),
        format_size(members.control.len() as u64),
        format_size(members.data.len() as u64)
    );

    Ok(())
}

/// Encoding errors belong to the package as a whole, not to either tarball.
pub(crate) fn assemble(
    package: &DebPackage<'_>,
    options: WriterOptions,
    output: &Path,
) -> Result<ArchiveWriter> {
    package.writer(options).map_err(|source| Error::AddFile {
        path: output.to_path_buf(),
        source,
    })
}

async fn read(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| Error::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}
