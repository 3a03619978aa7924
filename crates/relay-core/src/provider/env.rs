use std::collections::HashMap;

/// Read-only view of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    /// The trimmed value of `key`, with empty values treated as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// The real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_unset() {
        let env: HashMap<&str, &str> =
            HashMap::from([("A", "value"), ("B", ""), ("C", "   "), ("D", " padded ")]);

        assert_eq!(env.non_empty("A").as_deref(), Some("value"));
        assert_eq!(env.non_empty("B"), None);
        assert_eq!(env.non_empty("C"), None);
        assert_eq!(env.non_empty("D").as_deref(), Some("padded"));
        assert_eq!(env.non_empty("MISSING"), None);
        assert_eq!(env.var("B").as_deref(), Some(""));
    }
}
