//! Recognized request verbs.

use std::fmt;

/// Request method names a view member can be recognized as.
///
/// Member names are matched against the lowercase form; supported-method
/// metadata is reported in the uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    Post,
    Head,
    Options,
    Delete,
    Put,
    Trace,
    Patch,
}

impl Verb {
    /// Every recognized verb.
    pub const ALL: [Verb; 8] = [
        Verb::Get,
        Verb::Post,
        Verb::Head,
        Verb::Options,
        Verb::Delete,
        Verb::Put,
        Verb::Trace,
        Verb::Patch,
    ];

    /// Lowercase name, as used for handler member names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Head => "head",
            Verb::Options => "options",
            Verb::Delete => "delete",
            Verb::Put => "put",
            Verb::Trace => "trace",
            Verb::Patch => "patch",
        }
    }

    /// Uppercase name, as reported in supported-method metadata.
    pub fn as_upper(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
            Verb::Delete => "DELETE",
            Verb::Put => "PUT",
            Verb::Trace => "TRACE",
            Verb::Patch => "PATCH",
        }
    }

    /// Match a member name against the verb set.
    ///
    /// Case-sensitive: only the exact lowercase spelling is recognized, so a
    /// member called `Get` is not a verb handler.
    pub fn from_member_name(name: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_name_is_case_sensitive() {
        assert_eq!(Verb::from_member_name("get"), Some(Verb::Get));
        assert_eq!(Verb::from_member_name("options"), Some(Verb::Options));
        assert_eq!(Verb::from_member_name("GET"), None);
        assert_eq!(Verb::from_member_name("Get"), None);
        assert_eq!(Verb::from_member_name("connect"), None);
    }

    #[test]
    fn test_upper_matches_lower() {
        for verb in Verb::ALL {
            assert_eq!(verb.as_upper(), verb.as_str().to_uppercase());
            assert_eq!(verb.to_string(), verb.as_upper());
        }
    }

    #[test]
    fn test_normalized_names_are_members() {
        for name in [" PATCH ", "Delete", "get"] {
            let normalized = name.trim().to_lowercase();
            assert!(Verb::from_member_name(&normalized).is_some(), "{}", name);
        }
        assert_eq!(Verb::from_member_name("fetch"), None);
    }
}
