use std::path::PathBuf;

use structopt::clap::AppSettings::*;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "tfrecord",
    about = "Inspect, validate and pack TFRecord files.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands]
)]
pub struct Cli {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    pub verbose: bool,

    #[structopt(subcommand)]
    pub command: Commands,
}

#[derive(Debug, StructOpt)]
pub enum Commands {
    #[structopt(name = "list", visible_alias = "l", about = "List records in a file")]
    List(ListArgs),

    #[structopt(
        name = "validate",
        visible_alias = "t",
        about = "Read every record and verify checksums"
    )]
    Validate(ValidateArgs),

    #[structopt(
        name = "create",
        visible_alias = "c",
        about = "Write files, or lines of files, as records"
    )]
    Create(CreateArgs),

    #[structopt(
        name = "extract",
        visible_alias = "x",
        about = "Write each record to its own file"
    )]
    Extract(ExtractArgs),
}

#[derive(Debug, Clone, StructOpt)]
pub struct ReadArgs {
    #[structopt(
        long,
        default_value = "65536",
        help = "Bytes preallocated for record payloads"
    )]
    pub buffer_size: usize,

    #[structopt(long, help = "Skip payload checksum verification")]
    pub no_payload_crc: bool,
}

#[cfg(test)]
impl Default for ReadArgs {
    fn default() -> Self {
        ReadArgs::from_iter(std::iter::once("read"))
    }
}

#[derive(Debug, StructOpt)]
pub struct ListArgs {
    #[structopt(name = "file", parse(from_os_str), help = "Path to the .tfrecord file")]
    pub file: PathBuf,

    #[structopt(flatten)]
    pub read: ReadArgs,
}

#[derive(Debug, StructOpt)]
pub struct ValidateArgs {
    #[structopt(name = "file", parse(from_os_str), help = "Path to the .tfrecord file")]
    pub file: PathBuf,

    #[structopt(short, long, help = "Suppress output")]
    pub quiet: bool,

    #[structopt(flatten)]
    pub read: ReadArgs,
}

#[derive(Debug, StructOpt)]
pub struct CreateArgs {
    #[structopt(name = "file", parse(from_os_str), help = "Output .tfrecord file")]
    pub file: PathBuf,

    #[structopt(
        name = "inputs",
        parse(from_os_str),
        required = true,
        min_values = 1,
        help = "Files to store"
    )]
    pub inputs: Vec<PathBuf>,

    #[structopt(long, help = "Store each line of the inputs as its own record")]
    pub lines: bool,

    #[structopt(short, long, help = "Overwrite an existing output file")]
    pub force: bool,
}

#[derive(Debug, StructOpt)]
pub struct ExtractArgs {
    #[structopt(name = "file", parse(from_os_str), help = "Path to the .tfrecord file")]
    pub file: PathBuf,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "Output directory [default: current directory]"
    )]
    pub output: Option<PathBuf>,

    #[structopt(flatten)]
    pub read: ReadArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_defaults() {
        let args = ReadArgs::default();
        assert_eq!(args.buffer_size, 65536);
        assert!(!args.no_payload_crc);

        match Cli::from_iter(vec!["tfrecord", "t", "-q", "in.tfrecord"]).command {
            Commands::Validate(v) => {
                assert!(v.quiet);
                assert_eq!(v.read.buffer_size, ReadArgs::default().buffer_size);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
