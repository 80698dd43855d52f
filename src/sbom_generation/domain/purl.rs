use super::Ecosystem;
use serde::Serialize;
use std::fmt;

/// Package URL identifying one component: `pkg:<type>/<name>@<version>`.
///
/// The name is percent-encoded except for the npm scope characters `@` and
/// `/`, so `@types/node` stays readable. Equal inputs always produce equal
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Purl(String);

impl Purl {
    pub fn new(ecosystem: Ecosystem, name: &str, version: &str) -> Self {
        let encoded_name = urlencoding::encode(name)
            .replace("%40", "@")
            .replace("%2F", "/");
        Self(format!(
            "pkg:{}/{}@{}",
            ecosystem.purl_type(),
            encoded_name,
            version
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Purl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names() {
        assert_eq!(
            Purl::new(Ecosystem::Npm, "left-pad", "1.3.0").as_str(),
            "pkg:npm/left-pad@1.3.0"
        );
        assert_eq!(
            Purl::new(Ecosystem::Cargo, "serde_json", "1.0.108").as_str(),
            "pkg:cargo/serde_json@1.0.108"
        );
        assert_eq!(
            Purl::new(Ecosystem::PyPi, "zope.interface", "6.0").as_str(),
            "pkg:pypi/zope.interface@6.0"
        );
    }

    #[test]
    fn test_spaces_are_encoded() {
        assert_eq!(
            Purl::new(Ecosystem::Npm, "my pkg", "1.0.0").as_str(),
            "pkg:npm/my%20pkg@1.0.0"
        );
    }

    #[test]
    fn test_scope_keeps_slash() {
        assert_eq!(
            Purl::new(Ecosystem::Npm, "@types/node", "20.1.0").as_str(),
            "pkg:npm/@types/node@20.1.0"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = Purl::new(Ecosystem::PyPi, "requests", "2.31.0");
        let b = Purl::new(Ecosystem::PyPi, "requests", "2.31.0");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "pkg:pypi/requests@2.31.0");
    }
}
