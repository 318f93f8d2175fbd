// CLI module for euphory
//
// Command-line front end over the tag library. Only compiled into the binary.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

use anyhow::Result;

/// Dispatch a parsed command line.
pub fn run(config: Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match config.command {
        Commands::Detect { files } => commands::command_detect(&files, &formatter),
        Commands::Read { files, output, raw } => {
            commands::command_read(&files, output.as_deref(), raw, &formatter)
        }
        Commands::Write {
            file,
            tag_format,
            metadata,
            from_file,
            default_genre,
        } => commands::command_write(
            &file,
            tag_format.into(),
            metadata,
            from_file.as_deref(),
            default_genre,
            &formatter,
        ),
        Commands::Album { file } => commands::command_album(&file, &formatter),
        Commands::Track { file } => commands::command_track(&file, &formatter),
        Commands::Batch { directory, pattern } => {
            commands::command_batch(&directory, &pattern, &formatter)
        }
        Commands::Info { files } => commands::command_info(&files, &formatter),
    }
}
