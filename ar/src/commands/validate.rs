use ar_format::MappedArchive;

use crate::cli::ValidateArgs;
use crate::error::{Error, Result};

pub async fn run(args: ValidateArgs) -> Result<()> {
    let archive = MappedArchive::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;
    let reader = archive.reader().map_err(|source| Error::ReadArchive {
        path: args.archive.clone(),
        source,
    })?;

    let mut failures = 0usize;
    for record in &reader {
        if let Err(err) = record.validate() {
            failures += 1;
            if !args.quiet {
                eprintln!("{}: {}", record.name(), err);
            }
        }
    }

    if !args.quiet {
        println!(
            "Validated {} members ({} failures)",
            reader.len(),
            failures
        );
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
