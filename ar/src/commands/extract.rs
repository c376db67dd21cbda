use ar_format::{MappedArchive, Record};

use crate::cli::ExtractArgs;
use crate::error::{Error, Result};
use crate::util::is_safe_member_name;

pub async fn run(args: ExtractArgs) -> Result<()> {
    let archive = MappedArchive::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;
    let reader = archive.reader().map_err(|source| Error::ReadArchive {
        path: args.archive.clone(),
        source,
    })?;

    let selected: Vec<&Record> = if args.files.is_empty() {
        reader.iter().collect()
    } else {
        args.files
            .iter()
            .map(|name| {
                reader.find(name).ok_or_else(|| Error::MemberNotFound {
                    name: name.clone(),
                })
            })
            .collect::<Result<_>>()?
    };

    // Check every name before anything touches the disk.
    for record in &selected {
        let name = record.name();
        if !is_safe_member_name(&name) {
            return Err(Error::UnsafeMemberName {
                name: name.into_owned(),
            });
        }
    }

    let output_path = match args.output {
        Some(path) => path,
        None => std::env::current_dir().map_err(|source| Error::ProcessFile {
            path: ".".into(),
            source,
        })?,
    };

    tokio::fs::create_dir_all(&output_path)
        .await
        .map_err(|source| Error::ProcessFile {
            path: output_path.clone(),
            source,
        })?;

    for record in selected {
        let path = output_path.join(&*record.name());
        tokio::fs::write(&path, record.content())
            .await
            .map_err(|source| Error::ProcessFile {
                path: path.clone(),
                source,
            })?;

        #[cfg(unix)]
        if let Ok(mode) = record.mode() {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(mode & 0o777);
            tokio::fs::set_permissions(&path, permissions)
                .await
                .map_err(|source| Error::ProcessFile {
                    path: path.clone(),
                    source,
                })?;
        }

        tracing::trace!(name = %record.name(), size = record.size(), "extracted");
        if !args.quiet {
            println!("x {}", record.name());
        }
    }

    Ok(())
}
