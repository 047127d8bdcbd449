//! Logging utilities for CLI output

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output except errors
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Print a warning to stderr unless running quietly
pub fn warn(level: LogLevel, msg: &str) {
    if level != LogLevel::Quiet {
        eprintln!("warning: {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Quiet);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
    }
}
