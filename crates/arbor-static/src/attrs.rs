//! HTML attribute maps and keyword aliasing.

/// Configuration keys that are spelled differently from the attribute they set.
///
/// `class` is awkward to use as a key in most host languages and manifests,
/// so `cls` is accepted in its place.
const KEYWORD_ALIASES: &[(&str, &str)] = &[("cls", "class")];

/// An ordered attribute map with unique keys.
///
/// Keys are normalized through [`translate_keywords`] when the map is built,
/// so an alias key is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalized attribute map from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let raw: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            entries: translate_keywords(raw),
        }
    }

    /// Set an attribute, resolving aliases. Later values win.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = std::mem::take(&mut self.entries);
        entries.push((key.into(), value.into()));
        self.entries = translate_keywords(entries);
    }

    /// Look up an attribute by its resolved name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key='value'` pairs with no separator between entries.
    ///
    /// Values are not escaped; callers supply attribute-safe strings.
    pub fn render(&self) -> String {
        build_attributes(Some(self))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Rewrite alias keys to the attribute they stand for.
///
/// Returns a new list; an alias overwrites an explicit attribute of the
/// resolved name and moves to the end, and duplicate keys collapse to the
/// last value at the position of their first occurrence.
pub fn translate_keywords(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut plain: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    let mut aliased: Vec<(String, String)> = Vec::new();

    for (key, value) in pairs {
        match KEYWORD_ALIASES.iter().find(|(alias, _)| *alias == key) {
            Some((_, resolved)) => upsert(&mut aliased, resolved.to_string(), value),
            None => upsert(&mut plain, key, value),
        }
    }

    for (key, value) in aliased {
        plain.retain(|(k, _)| *k != key);
        plain.push((key, value));
    }

    plain
}

fn upsert(entries: &mut Vec<(String, String)>, key: String, value: String) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

/// Render an optional attribute map as `key='value'` pairs.
///
/// An absent map renders as the empty string.
pub fn build_attributes(attrs: Option<&Attributes>) -> String {
    let Some(attrs) = attrs else {
        return String::new();
    };

    attrs
        .entries
        .iter()
        .map(|(k, v)| format!("{}='{}'", k, v))
        .collect()
}

/// Format an opening tag, omitting the space when there are no attributes.
pub(crate) fn open_tag(tag: &str, attrs: &Attributes) -> String {
    if attrs.is_empty() {
        format!("<{}>", tag)
    } else {
        format!("<{} {}>", tag, attrs.render())
    }
}
