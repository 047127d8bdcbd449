//! Render command implementation

use super::{describe, finish};
use crate::cli::LogLevel;
use crate::config::{OutputFormat, RenderArgs, Settings};
use crate::pipeline;

pub fn run_render(args: RenderArgs, level: LogLevel) -> Result<(), String> {
    let settings = Settings::from_render(&args).map_err(|e| describe(&e))?;
    let summary = pipeline::run_render(&settings).map_err(|e| describe(&e))?;
    finish(&summary, OutputFormat::Text, level)
}
