//! Public-name derivation: casing plus pluralization.

use convert_case::{Case, Casing as _};
use serde::Serialize;

///
/// NameCasing
///
/// Output casing for derived public names.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum NameCasing {
    #[default]
    Camel,
    Kebab,
    Pascal,
    Snake,
}

impl NameCasing {
    const fn case(self) -> Case<'static> {
        match self {
            Self::Camel => Case::Camel,
            Self::Kebab => Case::Kebab,
            Self::Pascal => Case::Pascal,
            Self::Snake => Case::Snake,
        }
    }
}

///
/// NamingPolicy
///
/// Derives default public names when registration does not supply one.
/// Type names are pluralized (JSON:API convention); member names only
/// change casing.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct NamingPolicy {
    pub casing: NameCasing,
    pub pluralize_types: bool,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            casing: NameCasing::default(),
            pluralize_types: true,
        }
    }
}

impl NamingPolicy {
    /// Public name for a resource type, from its short type name.
    #[must_use]
    pub fn public_type_name(&self, type_name: &str) -> String {
        let cased = type_name.to_case(self.casing.case());
        if self.pluralize_types {
            pluralize(&cased)
        } else {
            cased
        }
    }

    /// Public name for a member (attribute or relationship).
    #[must_use]
    pub fn public_member_name(&self, member: &str) -> String {
        member.to_case(self.casing.case())
    }
}

// Irregular nouns that the suffix rules below would mangle.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("man", "men"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Pluralize the trailing word of an already-cased name.
#[must_use]
pub fn pluralize(name: &str) -> String {
    for (singular, plural) in IRREGULAR {
        if let Some(stem) = name.strip_suffix(singular) {
            return format!("{stem}{plural}");
        }
        let title = titlecase(singular);
        if let Some(stem) = name.strip_suffix(&title) {
            return format!("{stem}{}", titlecase(plural));
        }
    }

    let lower = name.to_ascii_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{name}es");
    }

    if let Some(stem) = name.strip_suffix('y') {
        let preceded_by_vowel = stem
            .chars()
            .last()
            .is_some_and(|c| "aeiou".contains(c.to_ascii_lowercase()));
        if !preceded_by_vowel {
            return format!("{stem}ies");
        }
    }

    format!("{name}s")
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
    })
}
