//! Config file formats feeding a real flag set.

use anyhow::{Result, bail, ensure};
use layerflags::{
    ConfigParser, DotEnvParser, FlagError, FlagSet, FlagSpec, ParseOptions, PlainParser,
};
use rstest::rstest;
use test_helpers::files::ConfigDir;
use test_helpers::recorder::Recorder;

fn record(parser: &dyn ConfigParser, input: &str) -> Result<Recorder> {
    let mut recorder = Recorder::default();
    parser.parse(&mut input.as_bytes(), &mut |name: &str, value: &str| {
        recorder.record(name, value);
        Ok(())
    })?;
    Ok(recorder)
}

#[rstest]
fn plain_trailing_comment_is_stripped() -> Result<()> {
    let recorder = record(&PlainParser, "name value # comment\n")?;
    ensure!(recorder.lines() == ["name=value"]);
    Ok(())
}

#[rstest]
fn plain_file_configures_a_flag_set() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write(
        "app.conf",
        "# service settings\n--listen 0.0.0.0:8080\nverbose\ntag a\ntag b # second\n",
    )?;
    let mut flags = FlagSet::new("app");
    let listen = flags.string(FlagSpec::default().long("listen"), "localhost:80")?;
    let verbose = flags.bool(FlagSpec::default().short('v').long("verbose"))?;
    let tags = flags.string_list(FlagSpec::default().long("tag"))?;
    let options = ParseOptions::new().config_file(path).config_parser(PlainParser);
    flags.parse(Vec::<String>::new(), &options)?;

    ensure!(flags.get(&listen).map(|v| v.get().as_str()) == Some("0.0.0.0:8080"));
    ensure!(flags.get(&verbose).map(|v| *v.get()) == Some(true));
    ensure!(flags.get(&tags).map(|v| v.values().to_vec()) == Some(vec!["a".to_owned(), "b".to_owned()]));
    Ok(())
}

#[rstest]
fn dotenv_file_maps_prefixed_keys() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write(
        ".env",
        "export APP_LOG_LEVEL=debug\nAPP_GREETING=\"hello\\tworld\"\nAPP_RAW='$HOME'\n",
    )?;
    let mut flags = FlagSet::new("app");
    let level = flags.choice(FlagSpec::default().long("log-level"), ["info", "debug"])?;
    let greeting = flags.string(FlagSpec::default().long("greeting"), "")?;
    let raw = flags.string(FlagSpec::default().long("raw"), "")?;
    let options = ParseOptions::new()
        .config_file(path)
        .config_parser(DotEnvParser::with_prefix("APP"));
    flags.parse(Vec::<String>::new(), &options)?;

    ensure!(flags.get(&level).map(|v| v.get()) == Some("debug"));
    ensure!(flags.get(&greeting).map(|v| v.get().as_str()) == Some("hello\tworld"));
    ensure!(flags.get(&raw).map(|v| v.get().as_str()) == Some("$HOME"));
    Ok(())
}

#[rstest]
fn invalid_choice_from_config_names_the_flag() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write("app.conf", "mode turbo\n")?;
    let mut flags = FlagSet::new("app");
    flags.choice(FlagSpec::default().long("mode"), ["fast", "slow"])?;
    let options = ParseOptions::new().config_file(path).config_parser(PlainParser);
    match flags.parse(Vec::<String>::new(), &options) {
        Err(FlagError::ParseValue { flag, value, reason }) => {
            ensure!(flag == "--mode" && value == "turbo");
            ensure!(reason.message().contains("fast, slow"));
        }
        other => bail!("expected ParseValue, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn decode_errors_report_the_file_path() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write(".env", "NOT AN ASSIGNMENT\n")?;
    let mut flags = FlagSet::new("app");
    let options = ParseOptions::new()
        .config_file(path.clone())
        .config_parser(DotEnvParser::new());
    let err = flags
        .parse(Vec::<String>::new(), &options)
        .err()
        .ok_or_else(|| anyhow::anyhow!("parse should fail"))?;
    ensure!(matches!(&err, FlagError::ConfigParse { path: Some(found), .. } if *found == path));
    ensure!(err.to_string().starts_with(&format!("config file {path}: line 1")));
    Ok(())
}

#[rstest]
fn missing_file_is_reported_with_its_path() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.path("absent.conf");
    let mut flags = FlagSet::new("app");
    let options = ParseOptions::new()
        .config_file(path.clone())
        .config_parser(PlainParser);
    match flags.parse(Vec::<String>::new(), &options) {
        Err(err @ FlagError::ConfigFileMissing { .. }) => {
            ensure!(err.to_string() == format!("config file {path} does not exist"));
        }
        other => bail!("expected ConfigFileMissing, got {other:?}"),
    }
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_file_with_custom_delimiter() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write(
        "app.toml",
        "[database]\nurl = \"postgres://db\"\npool = 8\n\n[features]\nenabled = [\"a\", \"b\", \"a\"]\n",
    )?;
    let mut flags = FlagSet::new("app");
    let url = flags.string(FlagSpec::default().long("database-url"), "")?;
    let pool = flags.int(FlagSpec::default().long("database-pool"), 1)?;
    let enabled = flags.string_set(FlagSpec::default().long("features-enabled"))?;
    let options = ParseOptions::new()
        .config_file(path)
        .config_parser(layerflags::TomlParser::new().delimiter("-"));
    flags.parse(Vec::<String>::new(), &options)?;

    ensure!(flags.get(&url).map(|v| v.get().as_str()) == Some("postgres://db"));
    ensure!(flags.get(&pool).map(|v| *v.get()) == Some(8));
    ensure!(flags.get(&enabled).map(|v| v.values().to_vec()) == Some(vec!["a".to_owned(), "b".to_owned()]));
    Ok(())
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_file_configures_nested_flags() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write("app.yaml", "log:\n  level: debug\nretries: 3\n")?;
    let mut flags = FlagSet::new("app");
    let level = flags.string(FlagSpec::default().long("log.level"), "info")?;
    let retries = flags.uint(FlagSpec::default().long("retries"), 0)?;
    let options = ParseOptions::new()
        .config_file(path)
        .config_parser(layerflags::YamlParser::new());
    flags.parse(Vec::<String>::new(), &options)?;
    ensure!(flags.get(&level).map(|v| v.get().as_str()) == Some("debug"));
    ensure!(flags.get(&retries).map(|v| *v.get()) == Some(3));
    Ok(())
}
