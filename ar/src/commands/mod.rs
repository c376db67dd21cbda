mod create;
mod deb;
mod extract;
mod list;
mod validate;

pub use create::run as create;
pub use deb::run as deb;
pub use extract::run as extract;
pub use list::run as list;
pub use validate::run as validate;

#[cfg(test)]
mod tests {
    use ar_format::deb::{DebMembers, DebPackage, CONTROL_TAR_GZ, DATA_TAR_GZ, MEMBER_MODE};
    use ar_format::{ArchiveReader, MappedArchive, WriterOptions};

    use crate::cli::{CreateArgs, DebArgs, ExtractArgs, ListArgs, ValidateArgs};
    use crate::error::Error;

    fn create_args(archive: std::path::PathBuf, files: Vec<std::path::PathBuf>) -> CreateArgs {
        CreateArgs {
            archive,
            uid: 0,
            gid: 0,
            mode: 0o640,
            mtime: 0,
            truncate: false,
            force: false,
            quiet: true,
            files,
        }
    }

    #[tokio::test]
    async fn create_then_extract() {
        let dir = tempfile::tempdir().unwrap();
        let short = dir.path().join("short.txt");
        let long = dir.path().join("a_rather_long_member_name.txt");
        std::fs::write(&short, b"odd").unwrap();
        std::fs::write(&long, b"even").unwrap();

        let archive = dir.path().join("out.a");
        super::create(create_args(archive.clone(), vec![short, long]))
            .await
            .unwrap();

        super::validate(ValidateArgs {
            archive: archive.clone(),
            quiet: true,
        })
        .await
        .unwrap();

        let output = dir.path().join("extracted");
        super::extract(ExtractArgs {
            archive,
            output: Some(output.clone()),
            quiet: true,
            files: vec![],
        })
        .await
        .unwrap();

        assert_eq!(std::fs::read(output.join("short.txt")).unwrap(), b"odd");
        assert_eq!(
            std::fs::read(output.join("a_rather_long_member_name.txt")).unwrap(),
            b"even"
        );
    }

    #[tokio::test]
    async fn existing_archive_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, b"x").unwrap();
        let archive = dir.path().join("out.a");
        std::fs::write(&archive, b"").unwrap();

        let err = super::create(create_args(archive.clone(), vec![input.clone()]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ArchiveExists { .. }));

        let mut args = create_args(archive, vec![input]);
        args.force = true;
        super::create(args).await.unwrap();
    }

    #[tokio::test]
    async fn unsafe_member_names_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("evil.a");
        let mut writer = ar_format::ArchiveWriter::new();
        writer.add(b"boom", "../escape").unwrap();
        std::fs::write(&archive, writer.finish()).unwrap();

        let output = dir.path().join("out");
        let err = super::extract(ExtractArgs {
            archive,
            output: Some(output.clone()),
            quiet: true,
            files: vec![],
        })
        .await
        .unwrap_err();
        assert!(matches!(err, Error::UnsafeMemberName { .. }));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn list_in_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let short = dir.path().join("short.txt");
        let long = dir.path().join("a_rather_long_member_name.txt");
        std::fs::write(&short, b"odd").unwrap();
        std::fs::write(&long, b"even").unwrap();

        let archive = dir.path().join("out.a");
        super::create(create_args(archive.clone(), vec![short, long]))
            .await
            .unwrap();

        for (long, json) in [(false, false), (true, false), (false, true)] {
            super::list(ListArgs {
                archive: archive.clone(),
                long,
                json,
            })
            .await
            .unwrap();
        }

        let mapped = MappedArchive::open(&archive).unwrap();
        let reader = mapped.reader().unwrap();
        let json = super::list::to_json(&reader).unwrap();
        let entries: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0]["name"], "short.txt");
        assert_eq!(entries[0]["size"], 3);
        assert_eq!(entries[0]["mode"], "640");
        assert_eq!(entries[0]["extended_name"], false);

        assert_eq!(entries[1]["name"], "a_rather_long_member_name.txt");
        assert_eq!(entries[1]["size"], 4);
        assert_eq!(entries[1]["extended_name"], true);
        assert_eq!(entries[1]["modified"], "1970-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn deb_package_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let control = dir.path().join(CONTROL_TAR_GZ);
        let data = dir.path().join(DATA_TAR_GZ);
        std::fs::write(&control, b"control bytes").unwrap();
        std::fs::write(&data, b"data bytes!").unwrap();

        let output = dir.path().join("pkg.deb");
        super::deb(DebArgs {
            output: output.clone(),
            control,
            data,
            force: false,
        })
        .await
        .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let reader = ArchiveReader::new(&bytes).unwrap();
        let members = DebMembers::from_reader(&reader).unwrap();
        assert_eq!(members.control, b"control bytes");
        assert_eq!(members.data, b"data bytes!");
        for record in &reader {
            assert_eq!(record.mode().unwrap(), MEMBER_MODE);
        }
    }

    #[test]
    fn deb_encoding_errors_name_the_package() {
        let output = std::path::Path::new("pkg.deb");
        let options = WriterOptions {
            uid: u32::MAX,
            ..DebPackage::writer_options()
        };
        let err = super::deb::assemble(&DebPackage::new(b"c", b"d"), options, output)
            .unwrap_err();
        match err {
            Error::AddFile { path, .. } => assert_eq!(path, output),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
