use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier of one generated test case.
///
/// Case ids are positional within a batch: `{KEY}-TC{nn}` when the issue has
/// a key, `TC{nn}` otherwise. They are printable and stable across re-runs of
/// the same issue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCaseId(pub String);

impl fmt::Display for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a learned pattern. Derived from content, so learning the
/// same shape twice yields the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(pub String);

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TestCaseId {
    /// Positional id for the `index`-th (1-based) case of a batch.
    pub fn for_issue(key: Option<&str>, index: usize) -> Self {
        match key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(k) => Self(format!("{}-TC{index:02}", k.to_uppercase())),
            None => Self(format!("TC{index:02}")),
        }
    }
}

impl PatternId {
    /// Deterministic pattern id from a small set of stable parts
    /// (feature type first, then the step shape).
    pub fn from_parts(parts: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self(hash_hex(parts))
    }

    /// First twelve hex characters, for log lines and CLI tables.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl RunId {
    /// Non-deterministic enough to avoid collisions without dragging in UUID/rand.
    pub fn now(prefix: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        RunId(format!("{prefix}_{nanos}"))
    }
}

fn hash_hex(parts: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    let mut hasher = Sha256::new();
    for (i, p) in parts.into_iter().enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(p.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_id_uses_uppercased_key() {
        assert_eq!(TestCaseId::for_issue(Some("proj-12"), 3).0, "PROJ-12-TC03");
    }

    #[test]
    fn case_id_without_key() {
        assert_eq!(TestCaseId::for_issue(None, 1).0, "TC01");
        assert_eq!(TestCaseId::for_issue(Some("  "), 10).0, "TC10");
    }

    #[test]
    fn pattern_id_is_hex_sha256() {
        let id = PatternId::from_parts(["login", "Given I am on the login page"]);
        assert_eq!(id.0.len(), 64);
        assert!(id.0.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id.short().len(), 12);
    }

    #[test]
    fn pattern_id_separates_parts() {
        let a = PatternId::from_parts(["ab", "c"]);
        let b = PatternId::from_parts(["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn run_id_has_prefix() {
        let id = RunId::now("run");
        assert!(id.0.starts_with("run_"));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TestCaseId("X-1-TC01".into());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"X-1-TC01\"");
    }
}
