//! Driver options, parsed from `--flag` / `--flag=value` arguments.

use purist_diagnostic::emitter::ColorMode;

use crate::DriverError;

/// Options shared by all commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Entry parser for `parse` and `tree` (see `purist_grammar::ENTRY_NAMES`).
    pub entry: String,
    /// Color mode for diagnostics on stderr.
    pub color: ColorMode,
    /// Parse multiple files in parallel.
    pub parallel: bool,
    /// Print the layout stack after every token in `layout`.
    pub stacks: bool,
    /// Include whitespace and comments in token and tree dumps.
    pub trivia: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            entry: "module".to_string(),
            color: ColorMode::Auto,
            parallel: true,
            stacks: false,
            trivia: false,
        }
    }
}

impl DriverConfig {
    /// Split `args` into options and positional arguments (file paths).
    pub fn from_args(args: &[String]) -> Result<(Self, Vec<String>), DriverError> {
        let mut config = DriverConfig::default();
        let mut positional = Vec::new();

        for arg in args {
            if let Some(entry) = arg.strip_prefix("--entry=") {
                config.entry = entry.to_string();
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                config.color =
                    ColorMode::parse(mode).ok_or_else(|| DriverError::InvalidColor(mode.into()))?;
            } else if arg == "--no-parallel" {
                config.parallel = false;
            } else if arg == "--stacks" {
                config.stacks = true;
            } else if arg == "--trivia" {
                config.trivia = true;
            } else if arg.starts_with('-') && arg.len() > 1 {
                return Err(DriverError::UnknownFlag(arg.clone()));
            } else {
                positional.push(arg.clone());
            }
        }

        Ok((config, positional))
    }
}

#[cfg(test)]
mod tests;
