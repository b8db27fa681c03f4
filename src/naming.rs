//! Key naming: case transforms and prefix injection.
//!
//! A schema key like `apiToken` maps to a raw source key in two independent
//! steps, in a fixed order:
//!
//! 1. **Prefix injection** (only when a prefix is configured):
//!    `foo` + `apiToken` → `fooApiToken`.
//! 2. **Case transform**: `fooApiToken` → `FOO_API_TOKEN` under
//!    [`Case::UpperSnake`], `foo-api-token` under [`Case::Kebab`], unchanged
//!    under [`Case::Identity`].
//!
//! The upper-snake transform is the canonical environment-variable
//! convention; live-environment loads and documentation always use it.

/// A case transform applied to a (possibly prefixed) schema key to compute
/// the raw source lookup key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Case {
    /// No rewriting; the key is used as declared.
    #[default]
    Identity,
    /// `fooApiToken` → `FOO_API_TOKEN`. The environment-variable convention.
    UpperSnake,
    /// `fooApiToken` → `foo_api_token`.
    Snake,
    /// `fooApiToken` → `foo-api-token`.
    Kebab,
    /// A caller-supplied transform.
    Custom(fn(&str) -> String),
}

impl Case {
    pub fn apply(&self, key: &str) -> String {
        match self {
            Case::Identity => key.to_string(),
            Case::UpperSnake => join_words(key, "_", str::to_uppercase),
            Case::Snake => join_words(key, "_", str::to_lowercase),
            Case::Kebab => join_words(key, "-", str::to_lowercase),
            Case::Custom(f) => f(key),
        }
    }
}

/// Prepend `prefix` to `key` with the key's first letter capitalized,
/// producing a single camel-style intermediate name. An empty prefix leaves
/// the key untouched.
pub(crate) fn inject_prefix(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{}", upper_first(key))
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join_words(key: &str, separator: &str, recase: impl Fn(&str) -> String) -> String {
    split_words(key)
        .iter()
        .map(|w| recase(w))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Split a key into words at non-alphanumeric separators and camel-case
/// boundaries. An uppercase run followed by a lowercase letter is treated as
/// an acronym plus a new word: `FOOUrl` → `FOO`, `Url`.
fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = match chars.get(i.wrapping_sub(1)) {
            Some(prev) if !current.is_empty() && c.is_uppercase() => {
                prev.is_lowercase()
                    || prev.is_numeric()
                    || (prev.is_uppercase()
                        && chars.get(i + 1).is_some_and(|next| next.is_lowercase()))
            }
            _ => false,
        };
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
