use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "bsdar",
    about = "Create, list and extract BSD ar archives.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(visible_alias = "c", about = "Create a new archive")]
    Create(CreateArgs),

    #[command(visible_alias = "x", about = "Extract members from an archive")]
    Extract(ExtractArgs),

    #[command(visible_aliases = ["l", "ls"], about = "List members of an archive")]
    List(ListArgs),

    #[command(visible_aliases = ["t", "test"], about = "Check every member header")]
    Validate(ValidateArgs),

    #[command(about = "Assemble a Debian binary package")]
    Deb(DebArgs),
}

#[derive(Debug, clap::Args)]
#[command(after_help = "\
\x1b[1m\x1b[4mExamples:\x1b[0m
  bsdar create libfoo.a foo.o bar.o
  bsdar create --mode 755 --uid 1000 tools.a bin/*
  bsdar create --truncate huge.a big_object_file.o")]
pub struct CreateArgs {
    /// Output archive path
    pub archive: PathBuf,

    /// Owner id written for every member
    #[arg(long, default_value_t = 0)]
    pub uid: u32,

    /// Group id written for every member
    #[arg(long, default_value_t = 0)]
    pub gid: u32,

    /// Permission bits written for every member, in octal
    #[arg(long, value_parser = parse_octal, default_value = "644")]
    pub mode: u32,

    /// Modification time written for every member, in seconds since the epoch
    #[arg(long, default_value_t = 0)]
    pub mtime: u64,

    /// Truncate numeric fields that do not fit instead of failing
    #[arg(long)]
    pub truncate: bool,

    /// Overwrite existing archive
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Suppress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Files to archive, stored under their file names
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive to extract
    pub archive: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Specific members to extract (extracts all if none specified)
    pub files: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Path to the archive
    pub archive: PathBuf,

    /// Show detailed information (mode, owner, timestamps)
    #[arg(short = 'l', long)]
    pub long: bool,

    /// Output in JSON format
    #[arg(short = 'j', long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// Path to the archive
    pub archive: PathBuf,

    /// Suppress output (quiet mode)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Debug, clap::Args)]
pub struct DebArgs {
    /// Output package path
    pub output: PathBuf,

    /// Compressed control tarball
    #[arg(long, value_name = "FILE")]
    pub control: PathBuf,

    /// Compressed data tarball
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Overwrite existing package
    #[arg(short = 'f', long)]
    pub force: bool,
}

fn parse_octal(value: &str) -> Result<u32, String> {
    let digits = value.strip_prefix("0o").unwrap_or(value);
    u32::from_str_radix(digits, 8).map_err(|_| format!("`{}` is not an octal mode", value))
}
