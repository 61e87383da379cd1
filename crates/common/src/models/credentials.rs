use std::collections::HashSet;
use std::fmt;

/// Static set of accepted access keys
///
/// Membership is exact and case-sensitive. Keys never show up in `Debug` output.
#[derive(Clone, Default)]
pub struct CredentialSet {
    keys: HashSet<String>,
}

impl CredentialSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("keys", &format_args!("<{} redacted>", self.keys.len()))
            .finish()
    }
}
