//! Supported-method metadata for view types.
//!
//! Computed once when a view type is built. The result is advisory: it is
//! what a routing layer reads to answer "which methods does this view
//! allow", while dispatch looks handlers up on its own every request.

use std::collections::BTreeSet;

use crate::verb::Verb;

/// Computes the supported-methods list of a view type.
///
/// Marker struct with associated functions, no state.
pub struct MethodRegistry;

impl MethodRegistry {
    /// Compute supported methods from member names.
    ///
    /// # Arguments
    ///
    /// * `member_names` - Handler names declared directly on the view type
    /// * `inherited` - Methods list of the parent view type, if any
    /// * `explicit` - Methods list set by the view author, if any
    ///
    /// An explicit list is returned exactly as given. Otherwise the inherited
    /// list is extended with the uppercase form of every member name that is
    /// a recognized verb, then sorted and de-duplicated. When nothing was
    /// collected the inherited value is returned as is (absent stays absent).
    pub fn compute<'a, I>(
        member_names: I,
        inherited: Option<&[String]>,
        explicit: Option<&[String]>,
    ) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if let Some(explicit) = explicit {
            return Some(explicit.to_vec());
        }

        let mut methods: BTreeSet<String> = inherited
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default();

        for name in member_names {
            if let Some(verb) = Verb::from_member_name(name) {
                methods.insert(verb.as_upper().to_string());
            }
        }

        if methods.is_empty() {
            return inherited.map(|m| m.to_vec());
        }

        Some(methods.into_iter().collect())
    }
}
