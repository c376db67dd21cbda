use std::io::{ErrorKind, Read};

use crate::*;

#[test]
fn read_reports_would_block_until_finalized() {
    let mut writer = ArchiveWriter::new();
    let mut buf = [0u8; 64];

    assert_eq!(writer.read(&mut buf).unwrap(), MAGIC.len());
    assert_eq!(&buf[..8], MAGIC);
    assert_eq!(
        writer.read(&mut buf).unwrap_err().kind(),
        ErrorKind::WouldBlock
    );

    writer.add(b"hi", "hi.txt").unwrap();
    writer.finalize();

    let mut rest = Vec::new();
    writer.read_to_end(&mut rest).unwrap();
    assert_eq!(rest.len(), 62);
    assert_eq!(writer.read(&mut buf).unwrap(), 0);
}

#[test]
fn write_to_drains_queue() {
    let mut writer = ArchiveWriter::new();
    let mut out = Vec::new();

    writer.add(b"one", "one").unwrap();
    assert_eq!(writer.write_to(&mut out).unwrap(), 8 + 60 + 4);
    assert_eq!(writer.write_to(&mut out).unwrap(), 0);

    writer.add(b"two", "two").unwrap();
    writer.finalize();
    writer.write_to(&mut out).unwrap();

    let reader = ArchiveReader::new(&out).unwrap();
    let names: Vec<_> = reader.iter().map(|r| r.name().into_owned()).collect();
    assert_eq!(names, ["one", "two"]);
}

#[test]
fn mapped_archive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.a");

    let mut writer = ArchiveWriter::new();
    writer
        .add(b"hello", "hello.txt")
        .unwrap()
        .add(b"a longer payload", "some_long_object_file_name.o")
        .unwrap();
    writer.finalize();
    let file = std::fs::File::create(&path).unwrap();
    writer.write_to(file).unwrap();

    let archive = MappedArchive::open(&path).unwrap();
    assert_eq!(archive.path(), path);
    let reader = archive.reader().unwrap();
    assert_eq!(reader.len(), 2);
    assert_eq!(reader.records()[1].name(), "some_long_object_file_name.o");
    assert_eq!(reader.records()[1].content(), b"a longer payload");
}

#[test]
fn mapped_empty_file_is_not_an_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.a");
    std::fs::write(&path, b"").unwrap();

    let archive = MappedArchive::open(&path).unwrap();
    assert_eq!(archive.reader().unwrap_err(), FormatError::MissingMagic);

    let err: std::io::Error = archive.reader().unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}
