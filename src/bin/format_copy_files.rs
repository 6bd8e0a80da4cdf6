// src/bin/format_copy_files.rs - format-copy-files: copy a tree under Windows-compatible file names
use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use log::info;
use media_utils::fs_utils::copy_path;
use media_utils::{rename_tree_from_cwd, strip_relative_prefix};
use std::path::PathBuf;

/// sysexits.h `EX_USAGE`.
#[cfg(not(windows))]
const USAGE_EXIT_CODE: i32 = 64;
/// winerror.h `ERROR_INVALID_COMMAND_LINE`.
#[cfg(windows)]
const USAGE_EXIT_CODE: i32 = 1639;

#[derive(Parser, Debug)]
#[command(
    name = "format-copy-files",
    about = "Copies files whose paths are not Windows-compatible to a destination, replacing the illegal characters",
    version,
    long_about = None
)]
struct Cli {
    #[arg(value_name = "SOURCE_PATH", help = "Directory tree to scan for files with illegal names")]
    source: PathBuf,

    #[arg(value_name = "DEST_PATH", help = "Directory to copy the renamed files into")]
    dest: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    let mut copied = 0usize;
    for renamed in rename_tree_from_cwd(&cli.source)? {
        let renamed = renamed?;
        let dest = cli.dest.join(strip_relative_prefix(&renamed.sanitized));
        copy_path(&renamed.original, &dest)?;
        copied += 1;
    }
    info!("copied {copied} renamed files into {}", cli.dest.display());
    Ok(())
}
