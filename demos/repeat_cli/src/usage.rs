//! Plain-text usage output built from command and flag metadata.

use std::io::{self, Write};

use layerflags::Command;

/// Writes usage for `command` to `out`.
pub fn write(out: &mut impl Write, command: &Command) -> io::Result<()> {
    writeln!(out, "USAGE")?;
    let usage = command.usage_text();
    writeln!(out, "  {}", if usage.is_empty() { command.name() } else { usage })?;

    let help = match command.long_help_text() {
        "" => command.short_help_text(),
        long => long,
    };
    if !help.is_empty() {
        writeln!(out, "\n{help}")?;
    }

    if !command.subcommands().is_empty() {
        writeln!(out, "\nSUBCOMMANDS")?;
        let width = command
            .subcommands()
            .iter()
            .map(|child| child.name().len())
            .max()
            .unwrap_or_default();
        for child in command.subcommands() {
            writeln!(out, "  {:width$}  {}", child.name(), child.short_help_text())?;
        }
    }

    let flags = command.flags().flags();
    if !flags.is_empty() {
        writeln!(out, "\nFLAGS ({})", command.flags().name())?;
        for flag in flags {
            let names = match (flag.short(), flag.long()) {
                (Some(short), Some(long)) => format!("-{short}, --{long}"),
                (Some(short), None) => format!("-{short}"),
                (None, Some(long)) => format!("    --{long}"),
                (None, None) => String::new(),
            };
            let value = if flag.is_bool() {
                String::new()
            } else {
                format!(" {}", flag.placeholder())
            };
            let default = match flag.default_text() {
                "" => String::new(),
                text => format!(" (default: {text:?})"),
            };
            writeln!(out, "  {names}{value}  {}{default}", flag.usage())?;
        }
    }
    Ok(())
}
