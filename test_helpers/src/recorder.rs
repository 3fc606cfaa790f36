//! Records the `(name, value)` pairs a config parser emits.

/// Ordered log of setter calls.
///
/// # Examples
///
/// ```
/// use layerflags_test_helpers::recorder::Recorder;
///
/// let mut recorder = Recorder::default();
/// recorder.record("tag", "a");
/// recorder.record("port", "80");
/// recorder.record("tag", "b");
/// assert_eq!(recorder.values_for("tag"), ["a", "b"]);
/// assert_eq!(recorder.names(), ["tag", "port", "tag"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    entries: Vec<(String, String)>,
}

impl Recorder {
    /// Appends one call.
    pub fn record(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_owned(), value.to_owned()));
    }

    /// Every call in order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Names in call order, repeats included.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Values delivered to `name`, in order.
    #[must_use]
    pub fn values_for(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Entries rendered as `name=value`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect()
    }
}
