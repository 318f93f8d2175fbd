// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};

use euphory::TagFormat;

/// Euphory - tag DJ-mix recordings from the command line
#[derive(Parser, Debug)]
#[command(name = "euphory")]
#[command(about = "Detect, read and write tags of long-form DJ-mix recordings", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging; RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// Tag layouts that can be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WritableFormat {
    /// 128-byte ID3v1.1 trailer (tail-preserving)
    Id3v1,
    /// Atom region at the file head (overwrites from offset 0)
    Mp4,
}

impl From<WritableFormat> for TagFormat {
    fn from(format: WritableFormat) -> Self {
        match format {
            WritableFormat::Id3v1 => TagFormat::Id3v1,
            WritableFormat::Mp4 => TagFormat::Mp4Tag,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect tag format
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Read tags from audio file(s)
    Read {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Include atoms that map to no field
        #[arg(long)]
        raw: bool,
    },

    /// Write tags to an audio file
    Write {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Tag layout to write
        #[arg(short = 't', long, value_enum)]
        tag_format: WritableFormat,

        /// Fields as a JSON object of strings
        #[arg(short, long, required_unless_present = "from_file")]
        metadata: Option<String>,

        /// Read fields from a JSON file
        #[arg(long, conflicts_with = "metadata")]
        from_file: Option<String>,

        /// ID3v1 genre code used when no genre field is given
        #[arg(long, default_value_t = euphory::id3::v1::DEFAULT_GENRE)]
        default_genre: u8,
    },

    /// Show the album view of a mix
    Album {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Show the track view of a file
    Track {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Detect the tag format of every file matching a pattern
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: String,

        /// File pattern (e.g., "*.mp3", "*.m4a")
        #[arg(short, long)]
        pattern: String,
    },

    /// Show file information
    Info {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },
}
