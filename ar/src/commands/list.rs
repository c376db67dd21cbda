use ar_format::{ArchiveReader, MappedArchive, Record};
use serde::Serialize;

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::util::{format_mode, format_size, format_time};

#[derive(Serialize)]
struct JsonEntry {
    name: String,
    offset: usize,
    size: u64,
    extended_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

impl From<&Record<'_>> for JsonEntry {
    fn from(record: &Record<'_>) -> Self {
        JsonEntry {
            name: record.name().into_owned(),
            offset: record.offset(),
            size: record.size(),
            extended_name: record.is_extended_name(),
            mode: record.mode().ok().map(|m| format!("{:o}", m)),
            uid: record.uid().ok(),
            gid: record.gid().ok(),
            modified: record
                .modified()
                .ok()
                .map(|t| format_time(Some(t))),
        }
    }
}

pub async fn run(args: ListArgs) -> Result<()> {
    let archive = MappedArchive::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;
    let reader = archive.reader().map_err(|source| Error::ReadArchive {
        path: args.archive.clone(),
        source,
    })?;

    if args.json {
        list_json(&reader)
    } else if args.long {
        list_long(&archive, &reader);
        Ok(())
    } else {
        list_compact(&reader);
        Ok(())
    }
}

fn list_compact(reader: &ArchiveReader) {
    for record in reader {
        println!("{}", record.name());
    }
}

fn list_long(archive: &MappedArchive, reader: &ArchiveReader) {
    println!(
        "Archive: {} ({} members)",
        archive.path().display(),
        reader.len()
    );
    println!();
    println!(
        "{:9}  {:>11}  {:>12}  {:20}  Name",
        "Perms", "Owner", "Size", "Modified"
    );
    println!("{}", "-".repeat(70));

    let mut total = 0u64;
    for record in reader {
        let owner = match (record.uid(), record.gid()) {
            (Ok(uid), Ok(gid)) => format!("{}/{}", uid, gid),
            _ => "-".into(),
        };
        println!(
            "{:9}  {:>11}  {:>12}  {:20}  {}",
            format_mode(record.mode().ok()),
            owner,
            format_size(record.size()),
            format_time(record.modified().ok()),
            record.name()
        );
        total += record.size();
    }

    println!("{}", "-".repeat(70));
    println!("{:9}  {:>11}  {:>12}  {:20}  Total", "", "", format_size(total), "");
}

fn list_json(reader: &ArchiveReader) -> Result<()> {
    println!("{}", to_json(reader)?);
    Ok(())
}

pub(crate) fn to_json(reader: &ArchiveReader) -> Result<String> {
    let entries: Vec<JsonEntry> = reader.iter().map(JsonEntry::from).collect();
    serde_json::to_string_pretty(&entries).map_err(|source| Error::Json { source })
}
