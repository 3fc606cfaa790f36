//! Command tree and parse options for the demo.

use std::io::{self, Write};

use layerflags::{Command, Environment, FlagResult, FlagSpec, ParseOptions, PlainParser};

/// Environment prefix shared by every command.
pub const ENV_PREFIX: &str = "REPEAT";

/// Builds `repeat [-v] [--config FILE] <subcommand>`.
pub fn build() -> FlagResult<Command> {
    let mut root = Command::new("repeat")
        .usage("repeat [FLAGS] <subcommand>")
        .short_help("print things, repeatedly")
        .long_help(
            "Flags may also be set with REPEAT_<NAME> environment variables or in the file \
             named by --config, one `name value` pair per line.",
        );
    let verbose = root
        .flags_mut()
        .bool(FlagSpec::default().short('v').long("verbose").usage("log verbose output"))?;
    root.flags_mut().string(
        FlagSpec::default()
            .long("config")
            .placeholder("FILE")
            .usage("config file (optional)"),
        "",
    )?;

    let mut say = Command::new("say")
        .usage("repeat say [-n TIMES] [--sep TEXT] <arg>...")
        .short_help("print the arguments several times");
    let times = say
        .flags_mut()
        .uint(FlagSpec::default().short('n').long("times").usage("repetitions"), 3)?;
    let separator = say
        .flags_mut()
        .string(FlagSpec::default().long("sep").usage("text between repetitions"), "\n")?;
    let say = say.exec(move |inv| {
        let count = inv.get(&times).map_or(0, |v| *v.get());
        let sep = inv.get(&separator).map_or("\n", |v| v.get().as_str());
        let line = inv.args().join(" ");
        if inv.get(&verbose).is_some_and(|v| *v.get()) {
            tracing::info!(count, %line, "repeating");
        }
        let mut out = io::stdout().lock();
        for index in 0..count {
            if index > 0 {
                write!(out, "{sep}")?;
            }
            write!(out, "{line}")?;
        }
        writeln!(out)?;
        Ok(())
    });

    let show = Command::new("show")
        .usage("repeat show")
        .short_help("list every visible flag and its resolved value")
        .exec(|inv| {
            let mut out = io::stdout().lock();
            for set in inv.flag_sets().iter().rev() {
                for flag in set.flags() {
                    let source = if flag.is_set() { "set" } else { "default" };
                    writeln!(
                        out,
                        "{}.{} = {:?} ({source})",
                        flag.group(),
                        flag.display_name(),
                        flag.value_text()
                    )?;
                }
            }
            Ok(())
        });

    Ok(root.subcommand(say).subcommand(show))
}

/// Options consulting `REPEAT_*` variables and the `--config` file.
pub fn options() -> ParseOptions {
    options_with(Environment::from_process())
}

/// The config file is read at every depth of the tree, so names belonging
/// to a deeper command are skipped until that command is parsed.
fn options_with(environment: Environment) -> ParseOptions {
    ParseOptions::new()
        .env_prefix(ENV_PREFIX)
        .environment(environment)
        .config_file_flag("config")
        .config_parser(PlainParser)
        .ignore_undefined_config_names(true)
}
