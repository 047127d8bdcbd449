//! Update command implementation

use super::{describe, finish};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Settings, UpdateArgs};
use crate::pipeline;

pub fn run_update(args: UpdateArgs, level: LogLevel) -> Result<(), String> {
    let settings = Settings::from_update(&args).map_err(|e| describe(&e))?;
    let sources = args.inputs.sources();

    log(
        level,
        LogLevel::Verbose,
        &format!("Merging {} source(s):", sources.len()),
    );
    for source in &sources {
        log(
            level,
            LogLevel::Verbose,
            &format!("  {} ({})", source.path.display(), source.kind),
        );
    }
    if settings.aliases.extra_len() > 0 {
        log(
            level,
            LogLevel::Verbose,
            &format!("  {} configured key synonym(s)", settings.aliases.extra_len()),
        );
    }

    let summary = pipeline::run_update(&settings, &sources).map_err(|e| describe(&e))?;
    finish(&summary, args.format, level)
}
