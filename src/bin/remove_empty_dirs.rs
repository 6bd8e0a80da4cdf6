// src/bin/remove_empty_dirs.rs - remove-empty-dirs: interactively delete directories without media files
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use media_utils::fs_utils::remove_recursively;
use media_utils::{deletion_prompt, find_empty_dirs, prompt_confirmation, PathPattern};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "remove-empty-dirs",
    about = "Cleans up (sub-)directories of a tree which contain no files matching a content pattern, e.g. media files such as \"*.mp3\" or \"*.mpg\" by default",
    version,
    long_about = None
)]
struct Cli {
    #[arg(value_name = "INDIR", help = "Root directory to search for subdirectories without content files")]
    indir: PathBuf,

    #[arg(
        short = 'f',
        long,
        alias = "content_file_pattern",
        value_name = "REGEX",
        help = "Pattern matching names of content files [default: common audio/video extensions]"
    )]
    content_file_pattern: Option<PathPattern>,

    #[arg(
        short = 'e',
        long,
        alias = "subdir_exclusion_pattern",
        value_name = "REGEX",
        help = "Pattern matching subdirectory paths to exclude from search and deletion [default: .*/artwork]"
    )]
    subdir_exclusion_pattern: Option<PathPattern>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let content_files = match cli.content_file_pattern {
        Some(p) => p,
        None => PathPattern::default_content_files().context("invalid built-in content pattern")?,
    };
    let exclusion = match cli.subdir_exclusion_pattern {
        Some(p) => p,
        None => PathPattern::default_subdir_exclusion()
            .context("invalid built-in exclusion pattern")?,
    };
    info!(
        "searching {} (content: {content_files}, excluding: {exclusion})",
        cli.indir.display()
    );

    let empty_dirs = find_empty_dirs(&cli.indir, &content_files, Some(&exclusion))?;

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    let mut deleted = 0usize;
    for path in &empty_dirs {
        if prompt_confirmation(&mut input, &mut output, &deletion_prompt(path))? {
            remove_recursively(path)?;
            info!("deleted {}", path.display());
            deleted += 1;
        }
    }
    eprintln!(
        "Deleted {deleted} director{}.",
        if deleted == 1 { "y" } else { "ies" }
    );
    Ok(())
}
