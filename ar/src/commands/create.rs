use std::path::Path;

use ar_format::{ArchiveWriter, EntryOptions, OverflowPolicy, WriterOptions};

use crate::cli::CreateArgs;
use crate::error::{Error, Result};
use crate::util::format_size;

pub async fn run(args: CreateArgs) -> Result<()> {
    if args.files.is_empty() {
        return Err(Error::NoFilesSpecified);
    }

    if !args.force && tokio::fs::try_exists(&args.archive).await.unwrap_or(false) {
        return Err(Error::ArchiveExists { path: args.archive });
    }

    let options = WriterOptions {
        uid: args.uid,
        gid: args.gid,
        mode: args.mode,
        mtime: args.mtime,
        overflow: if args.truncate {
            OverflowPolicy::Truncate
        } else {
            OverflowPolicy::Reject
        },
    };
    let mut writer = ArchiveWriter::with_options(options);

    let mut total = 0u64;
    for path in &args.files {
        let name = member_name(path)?;
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| Error::OpenFile {
                path: path.clone(),
                source,
            })?;

        writer
            .add(&content, EntryOptions::new(name))
            .map_err(|source| Error::AddFile {
                path: path.clone(),
                source,
            })?;

        if !args.quiet {
            println!("a {}", path.display());
        }
        total += content.len() as u64;
    }
    writer.finalize();

    let mut file = tokio::fs::File::create(&args.archive)
        .await
        .map_err(|source| Error::CreateArchive {
            path: args.archive.clone(),
            source,
        })?;
    let written = write_archive(&mut writer, &mut file)
        .await
        .map_err(|source| Error::CreateArchive {
            path: args.archive.clone(),
            source,
        })?;

    tracing::debug!(entries = writer.entries(), written, "archive written");

    if !args.quiet {
        println!(
            "Created {} with {} members ({} of content)",
            args.archive.display(),
            writer.entries(),
            format_size(total)
        );
    }

    Ok(())
}

pub(crate) async fn write_archive(
    writer: &mut ArchiveWriter,
    file: &mut tokio::fs::File,
) -> std::io::Result<u64> {
    use tokio::io::AsyncWriteExt;

    let written = tokio::io::copy(writer, file).await?;
    file.flush().await?;
    Ok(written)
}

fn member_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::NoFileName {
            path: path.to_path_buf(),
        })
}
