//! JSON, TOML, and YAML parsers built on the generic [`Node`] tree.
//!
//! Each decodes the whole document, converts it into a [`Node`], and
//! flattens it with a configurable delimiter. Empty input yields nothing.

use std::io::Read;

use super::{ConfigParser, Node, Setter, flatten};
use crate::{FlagError, FlagResult};

const DEFAULT_DELIMITER: &str = ".";

fn read_document(reader: &mut dyn Read) -> FlagResult<Option<String>> {
    let text = std::io::read_to_string(reader).map_err(FlagError::config_parse)?;
    Ok((!text.trim().is_empty()).then_some(text))
}

fn flatten_document(root: Node, delimiter: &str, set: &mut Setter<'_>) -> FlagResult<()> {
    match root {
        Node::Mapping(_) => flatten(&root, delimiter, set),
        _ => Err(FlagError::config_parse("top-level value must be a mapping")),
    }
}

macro_rules! structured_parser {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            delimiter: String,
        }

        impl $name {
            /// Creates a parser joining nested keys with `.`.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Joins nested keys with `delimiter` instead.
            #[must_use]
            pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
                self.delimiter = delimiter.into();
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    delimiter: String::from(DEFAULT_DELIMITER),
                }
            }
        }
    };
}

#[cfg(feature = "serde_json")]
structured_parser!(
    /// Parser for JSON documents.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerflags::{ConfigParser, JsonParser};
    ///
    /// let mut input = r#"{"db": {"host": "localhost", "ports": [1, 2]}}"#.as_bytes();
    /// let mut seen = Vec::new();
    /// JsonParser::new().delimiter("-").parse(&mut input, &mut |name: &str, value: &str| {
    ///     seen.push(format!("{name}={value}"));
    ///     Ok(())
    /// })?;
    /// assert_eq!(seen, ["db-host=localhost", "db-ports=1", "db-ports=2"]);
    /// # Ok::<_, layerflags::FlagError>(())
    /// ```
    JsonParser
);

#[cfg(feature = "toml")]
structured_parser!(
    /// Parser for TOML documents. Datetimes have no flag form and are
    /// rejected.
    TomlParser
);

#[cfg(feature = "yaml")]
structured_parser!(
    /// Parser for YAML documents, decoded with strict booleans so only
    /// `true` and `false` are booleans.
    YamlParser
);

#[cfg(feature = "serde_json")]
impl ConfigParser for JsonParser {
    fn parse(&self, reader: &mut dyn Read, set: &mut Setter<'_>) -> FlagResult<()> {
        let Some(text) = read_document(reader)? else {
            return Ok(());
        };
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(FlagError::config_parse)?;
        flatten_document(Node::from(value), &self.delimiter, set)
    }
}

#[cfg(feature = "toml")]
impl ConfigParser for TomlParser {
    fn parse(&self, reader: &mut dyn Read, set: &mut Setter<'_>) -> FlagResult<()> {
        let Some(text) = read_document(reader)? else {
            return Ok(());
        };
        let table: toml::Table = toml::from_str(&text).map_err(FlagError::config_parse)?;
        flatten_document(Node::from(toml::Value::Table(table)), &self.delimiter, set)
    }
}

#[cfg(feature = "yaml")]
impl ConfigParser for YamlParser {
    fn parse(&self, reader: &mut dyn Read, set: &mut Setter<'_>) -> FlagResult<()> {
        let Some(text) = read_document(reader)? else {
            return Ok(());
        };
        let value: serde_json::Value = serde_saphyr::from_str_with_options(
            &text,
            serde_saphyr::Options {
                strict_booleans: true,
                ..serde_saphyr::Options::default()
            },
        )
        .map_err(FlagError::config_parse)?;
        flatten_document(Node::from(value), &self.delimiter, set)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::config::ConfigParser;
    use crate::{FlagError, FlagResult};

    fn entries(parser: &dyn ConfigParser, input: &str) -> FlagResult<Vec<String>> {
        let mut seen = Vec::new();
        parser.parse(&mut input.as_bytes(), &mut |name: &str, value: &str| {
            seen.push(format!("{name}={value}"));
            Ok(())
        })?;
        Ok(seen)
    }

    #[cfg(feature = "serde_json")]
    #[rstest]
    #[case("")]
    #[case("  \n\t")]
    fn empty_json_yields_nothing(#[case] input: &str) {
        let parser = super::JsonParser::new();
        assert_eq!(entries(&parser, input).ok(), Some(Vec::new()));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_keeps_document_order() {
        let parser = super::JsonParser::new();
        let input = r#"{"z": 1, "a": {"y": true, "b": 2.5}, "m": "text"}"#;
        assert_eq!(
            entries(&parser, input).ok(),
            Some(vec![
                "z=1".to_owned(),
                "a.y=true".to_owned(),
                "a.b=2.5".to_owned(),
                "m=text".to_owned(),
            ])
        );
    }

    #[cfg(feature = "serde_json")]
    #[rstest]
    #[case("{\"a\": ")]
    #[case("[1, 2]")]
    fn json_decode_failures_are_config_parse(#[case] input: &str) {
        let parser = super::JsonParser::new();
        assert!(matches!(
            entries(&parser, input),
            Err(FlagError::ConfigParse { path: None, .. })
        ));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_null_is_a_conversion_error() {
        let parser = super::JsonParser::new();
        assert!(matches!(
            entries(&parser, r#"{"a": null}"#),
            Err(FlagError::StringConversion { .. })
        ));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_flattens_tables_and_arrays() {
        let parser = super::TomlParser::new().delimiter("_");
        let input = "name = \"demo\"\ntags = [\"a\", \"b\"]\n\n[server]\nport = 8080\n";
        assert_eq!(
            entries(&parser, input).ok(),
            Some(vec![
                "name=demo".to_owned(),
                "tags=a".to_owned(),
                "tags=b".to_owned(),
                "server_port=8080".to_owned(),
            ])
        );
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_datetimes_are_rejected() {
        let parser = super::TomlParser::new();
        match entries(&parser, "when = 1979-05-27T07:32:00Z\n") {
            Err(FlagError::StringConversion { value }) => assert!(value.starts_with("datetime")),
            other => panic!("expected StringConversion, got {other:?}"),
        }
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_syntax_errors_are_config_parse() {
        let parser = super::TomlParser::new();
        assert!(matches!(
            entries(&parser, "name = \n"),
            Err(FlagError::ConfigParse { .. })
        ));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_flattens_nested_mappings() {
        let parser = super::YamlParser::new();
        let input = "log:\n  level: debug\nitems:\n  - 1\n  - two\n";
        assert_eq!(
            entries(&parser, input).ok(),
            Some(vec![
                "log.level=debug".to_owned(),
                "items=1".to_owned(),
                "items=two".to_owned(),
            ])
        );
    }
}
