use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use safename::{
    dedup_extensions, ensure_directory, logging, print_summary, rename_files, SanitizeMode,
    ScanRequest, DEFAULT_EXTENSIONS,
};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  safename /path/to/videos
  safename -r -v /path/to/videos
  safename -n /path/to/videos -e mkv mp4
  safename --mode simple -e mkv,description /path/to/videos";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rename video files by replacing spaces and special characters with underscores",
    long_about = None,
    after_help = EXAMPLES
)]
struct Args {
    /// Directory containing the files to rename
    directory: PathBuf,

    /// Which characters to replace
    #[arg(long, value_enum, default_value_t = SanitizeMode::Advanced)]
    mode: SanitizeMode,

    /// Process subdirectories recursively
    #[arg(long, short)]
    recursive: bool,

    /// Preview changes without renaming
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Show each rename operation
    #[arg(long, short)]
    verbose: bool,

    /// File extensions to process, without the leading dot
    #[arg(
        long,
        short,
        num_args = 1..,
        value_delimiter = ',',
        default_values_t = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect::<Vec<_>>()
    )]
    extensions: Vec<String>,
}

impl Args {
    fn into_request(self) -> ScanRequest {
        ScanRequest {
            root: self.directory,
            extensions: dedup_extensions(&self.extensions),
            recursive: self.recursive,
            dry_run: self.dry_run,
            verbose: self.verbose,
            mode: self.mode,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn print_banner(request: &ScanRequest) {
    println!("{}", "########################################".bold());
    println!("{}", "#              Rename Tool             #".bold());
    println!("{}", "########################################".bold());
    println!("Directory: {}", request.root.display());
    println!("Extensions: {}", request.extensions.join(", "));
    println!("Mode: {}", request.mode);
    println!("Recursive: {}", yes_no(request.recursive));
    println!("Dry run: {}", yes_no(request.dry_run));
    println!("Verbose: {}", yes_no(request.verbose));
    println!();
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logger(args.verbose);

    let request = args.into_request();

    // Refuse before printing anything if the directory is unusable
    ensure_directory(&request.root)?;

    print_banner(&request);

    let report = rename_files(&request)?;
    print_summary(&report);

    Ok(())
}
