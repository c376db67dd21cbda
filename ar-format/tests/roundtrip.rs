//! Properties that must hold for any archive produced by the writer.

use ar_format::header::{Field, END_MARKER, HEADER_LEN, MAGIC};
use ar_format::{records, ArchiveReader, ArchiveWriter, FormatError};
use proptest::prelude::*;

/// Plain names: no spaces, at most 16 bytes, not starting with the extended marker.
fn short_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,16}".prop_filter("extended marker", |s| !s.starts_with("#1/"))
}

fn long_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._ -]{17,80}"
}

fn entries<S>(names: S) -> impl Strategy<Value = Vec<(String, Vec<u8>)>>
where
    S: Strategy<Value = String>,
{
    prop::collection::vec((names, prop::collection::vec(any::<u8>(), 0..300)), 0..12)
}

fn write(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ArchiveWriter::new();
    for (name, content) in entries {
        writer.add(content, name.as_str()).unwrap();
    }
    writer.finish()
}

proptest! {
    #[test]
    fn short_names_round_trip(entries in entries(short_name())) {
        let bytes = write(&entries);
        let reader = ArchiveReader::new(&bytes).unwrap();

        prop_assert_eq!(reader.len(), entries.len());
        for (record, (name, content)) in reader.iter().zip(&entries) {
            prop_assert!(!record.is_extended_name());
            prop_assert_eq!(record.name(), name.as_str());
            prop_assert_eq!(record.content(), content.as_slice());
        }
    }

    #[test]
    fn long_names_round_trip(entries in entries(long_name())) {
        let bytes = write(&entries);
        let reader = ArchiveReader::new(&bytes).unwrap();

        prop_assert_eq!(reader.len(), entries.len());
        for (record, (name, content)) in reader.iter().zip(&entries) {
            let header = &bytes[record.offset()..record.offset() + HEADER_LEN];
            let marker = format!("#1/{}", name.len());
            prop_assert!(header[Field::Name.range()].starts_with(marker.as_bytes()));
            prop_assert_eq!(record.name(), name.as_str());
            prop_assert_eq!(record.content(), content.as_slice());
            prop_assert_eq!(record.declared_size(), (name.len() + content.len()) as u64);
        }
    }

    #[test]
    fn records_are_even_aligned(entries in entries(prop_oneof![short_name(), long_name()])) {
        let bytes = write(&entries);
        let reader = ArchiveReader::new(&bytes).unwrap();

        let mut offset = MAGIC.len();
        for record in &reader {
            prop_assert_eq!(record.offset(), offset);
            prop_assert_eq!(offset % 2, 0);
            prop_assert!(record.padding() <= 1);
            prop_assert_eq!((record.header_size() + record.size() as usize + record.padding()) % 2, 0);
            if record.padding() == 1 {
                prop_assert_eq!(bytes[offset + record.total_size() - 1], b'\n');
            }
            offset += record.total_size();
        }
        prop_assert_eq!(offset, bytes.len());
    }

    #[test]
    fn lazy_walk_matches_reader(entries in entries(short_name())) {
        let bytes = write(&entries);
        let reader = ArchiveReader::new(&bytes).unwrap();
        let walked = records(&bytes).unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        prop_assert_eq!(reader.records(), walked.as_slice());
    }

    #[test]
    fn foreign_prefix_is_rejected(prefix in prop::collection::vec(any::<u8>(), 0..16)) {
        prop_assume!(!prefix.starts_with(MAGIC));
        prop_assert_eq!(ArchiveReader::new(&prefix).unwrap_err(), FormatError::MissingMagic);
    }

    #[test]
    fn corrupted_end_marker_is_rejected(
        entries in entries(short_name()).prop_filter("non-empty", |e| !e.is_empty()),
        pick in any::<prop::sample::Index>(),
        which in 0..END_MARKER.len(),
        byte in any::<u8>()
    ) {
        prop_assume!(byte != END_MARKER[which]);
        let mut bytes = write(&entries);
        let offsets: Vec<usize> = ArchiveReader::new(&bytes)
            .unwrap()
            .iter()
            .map(|r| r.offset())
            .collect();
        let offset = offsets[pick.index(offsets.len())];
        bytes[offset + Field::EndMarker.range().start + which] = byte;

        let is_end_marker_error = matches!(
            ArchiveReader::new(&bytes),
            Err(FormatError::InvalidEndMarker { offset: o, .. }) if o == offset
        );
        prop_assert!(is_end_marker_error);
    }
}

#[test]
fn reference_layout_for_two_entries() {
    let bytes = write(&[
        ("hello.txt".into(), b"hello".to_vec()),
        ("world.txt".into(), b"world".to_vec()),
    ]);
    let expected: &[u8] = b"!<arch>\n\
        hello.txt       0           0     0     644     5         `\n\
        hello\n\
        world.txt       0           0     0     644     5         `\n\
        world\n";
    assert_eq!(bytes, expected);
}

#[test]
fn twenty_character_name_layout() {
    let name = "twenty_characters.go";
    let bytes = write(&[(name.into(), b"content".to_vec())]);
    let expected: &[u8] = b"!<arch>\n\
        #1/20           0           0     0     644     27        `\n\
        twenty_characters.gocontent\n";
    assert_eq!(bytes, expected);
}
