//! Derivation of environment variable names from flag names.

use crate::ParseOptions;
use crate::flag::Flag;

/// Returns the environment variable names `flag` answers to under
/// `options`, long-name candidate first.
///
/// The long name is uppercased with `-`, `.` and `/` mapped to `_`. The
/// short name only participates when enabled. Both are qualified by the
/// configured prefix.
///
/// # Examples
///
/// ```
/// use layerflags::{FlagSet, FlagSpec, ParseOptions, env::candidate_names};
///
/// # fn main() -> layerflags::FlagResult<()> {
/// let mut flags = FlagSet::new("app");
/// flags.string(FlagSpec::default().short('l').long("log.level"), "info")?;
/// let options = ParseOptions::new().env_prefix("app").env_short_names(true);
/// let names = flags.flag("log.level").map(|f| candidate_names(f, &options));
/// assert_eq!(names, Some(vec!["APP_LOG_LEVEL".to_owned(), "APP_L".to_owned()]));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn candidate_names(flag: &Flag, options: &ParseOptions) -> Vec<String> {
    let prefix = options.prefix();
    let long = flag.long().map(|long| qualify(prefix, &normalise(long)));
    let short = flag
        .short()
        .filter(|_| options.env_short_names)
        .map(|short| qualify(prefix, &short.to_uppercase().to_string()));
    long.into_iter().chain(short).collect()
}

fn normalise(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '.' | '/' => '_',
            other => other,
        })
        .collect::<String>()
        .to_uppercase()
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}_{name}", prefix.to_uppercase()),
        None => name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::candidate_names;
    use crate::{FlagSet, FlagSpec, ParseOptions};

    fn names_for(spec: FlagSpec, options: &ParseOptions) -> Vec<String> {
        let mut flags = FlagSet::new("test");
        flags.bool(spec).ok();
        flags
            .flags()
            .first()
            .map(|flag| candidate_names(flag, options))
            .unwrap_or_default()
    }

    #[rstest]
    #[case("delta", None, "DELTA")]
    #[case("delta", Some("PREFIX"), "PREFIX_DELTA")]
    #[case("log-level", Some("app_"), "APP_LOG_LEVEL")]
    #[case("db.url", None, "DB_URL")]
    #[case("path/to", None, "PATH_TO")]
    fn derives_long_name(
        #[case] long: &str,
        #[case] prefix: Option<&str>,
        #[case] expected: &str,
    ) {
        let options = prefix.map_or_else(
            || ParseOptions::new().env_vars(),
            |p| ParseOptions::new().env_prefix(p),
        );
        assert_eq!(names_for(FlagSpec::default().long(long), &options), [expected]);
    }

    #[test]
    fn short_names_participate_only_when_enabled() {
        let spec = FlagSpec::default().short('v').long("verbose");
        let off = ParseOptions::new().env_prefix("APP");
        assert_eq!(names_for(spec.clone(), &off), ["APP_VERBOSE"]);
        let on = off.env_short_names(true);
        assert_eq!(names_for(spec, &on), ["APP_VERBOSE", "APP_V"]);
    }

    #[test]
    fn short_only_flag_without_participation_has_no_names() {
        let options = ParseOptions::new().env_vars();
        assert!(names_for(FlagSpec::default().short('q'), &options).is_empty());
    }
}
