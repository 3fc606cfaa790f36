//! Ordered snapshot of environment variables handed to a parse.

/// Ordered `(name, value)` pairs standing in for the process environment.
///
/// Parsing never reads the live environment; callers capture it with
/// [`Environment::from_process`] or build one explicitly.
///
/// # Examples
///
/// ```
/// use layerflags::Environment;
///
/// let env = Environment::from_pairs([("APP_DELTA", "33ms")]);
/// assert_eq!(env.get("APP_DELTA"), Some("33ms"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(String, String)>,
}

impl Environment {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Captures the current process environment.
    ///
    /// Names and values that are not valid Unicode are converted lossily.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .map(|(name, value)| {
                (
                    name.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    /// Appends a variable.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.push((name.into(), value.into()));
    }

    /// Returns the first value recorded for `name`, compared exactly.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates the variables in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of variables.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no variables.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.push(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn keeps_insertion_order() {
        let mut env = Environment::from_pairs([("B", "2"), ("A", "1")]);
        env.extend([("C", "3")]);
        let names: Vec<_> = env.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn get_returns_first_match() {
        let env = Environment::from_pairs([("A", "first"), ("A", "second")]);
        assert_eq!(env.get("A"), Some("first"));
        assert_eq!(env.get("a"), None);
    }
}
