//! Stylesheet data and its text serialization.
//!
//! This is a flat structural transform, not a CSS engine: each selector
//! becomes a block of `property = value;` lines.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Selector to property/value declarations.
///
/// Both levels are kept sorted, which makes serialization byte-reproducible
/// regardless of the order rules were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Stylesheet {
    rules: BTreeMap<String, BTreeMap<String, String>>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add declarations for a selector, merging with any already present.
    pub fn rule<I, K, V>(mut self, selector: impl Into<String>, declarations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let block = self.rules.entry(selector.into()).or_default();
        for (property, value) in declarations {
            block.insert(property.into(), value.into());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of selectors.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Serialize to text. See [`stylesheet_to_text`].
    pub fn to_text(&self) -> String {
        stylesheet_to_text(self)
    }
}

impl<S, I, K, V> FromIterator<(S, I)> for Stylesheet
where
    S: Into<String>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Stylesheet::new(), |sheet, (selector, decls)| {
                sheet.rule(selector, decls)
            })
    }
}

/// Serialize stylesheet data.
///
/// Selectors and properties are emitted in ascending lexicographic order.
/// Each block is `selector{`, one `\tproperty = value;` line per
/// declaration, then `}`; lines are joined with `\n`.
pub fn stylesheet_to_text(sheet: &Stylesheet) -> String {
    let mut lines = Vec::new();

    for (selector, declarations) in &sheet.rules {
        lines.push(format!("{}{{", selector));
        for (property, value) in declarations {
            lines.push(format!("\t{} = {};", property, value));
        }
        lines.push("}".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn orders_selectors_lexicographically() {
        let sheet = Stylesheet::new()
            .rule("body", [("color", "red")])
            .rule("a", [("text-decoration", "none")]);

        let css = sheet.to_text();

        assert_eq!(css, "a{\n\ttext-decoration = none;\n}\nbody{\n\tcolor = red;\n}");
        assert!(css.find("a{").unwrap() < css.find("body{").unwrap());
    }

    #[test]
    fn orders_properties_lexicographically() {
        let sheet = Stylesheet::new().rule(
            ".menu",
            [("padding", "0"), ("display", "flex"), ("margin", "0 auto")],
        );

        assert_eq!(
            sheet.to_text(),
            ".menu{\n\tdisplay = flex;\n\tmargin = 0 auto;\n\tpadding = 0;\n}"
        );
    }

    #[test]
    fn output_is_independent_of_declaration_order() {
        let forward: Stylesheet = vec![
            ("nav", vec![("color", "blue"), ("background", "white")]),
            ("a", vec![("color", "black")]),
        ]
        .into_iter()
        .collect();
        let backward: Stylesheet = vec![
            ("a", vec![("color", "black")]),
            ("nav", vec![("background", "white"), ("color", "blue")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(forward, backward);
        assert_eq!(forward.to_text(), backward.to_text());
        assert_eq!(forward.to_text(), forward.to_text());
    }

    #[test]
    fn repeated_rule_merges_declarations() {
        let sheet = Stylesheet::new()
            .rule("p", [("color", "red")])
            .rule("p", [("color", "green"), ("margin", "0")]);

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.to_text(), "p{\n\tcolor = green;\n\tmargin = 0;\n}");
    }

    #[test]
    fn empty_stylesheet_is_empty_text() {
        assert_eq!(Stylesheet::new().to_text(), "");
    }

    #[test]
    fn deserializes_from_nested_tables() {
        let sheet: Stylesheet = toml::from_str(
            r#"
            [body]
            color = "red"
            "#,
        )
        .unwrap();

        assert_eq!(sheet.to_text(), "body{\n\tcolor = red;\n}");
    }

    #[test]
    fn rejects_non_string_values() {
        let result: Result<Stylesheet, _> = toml::from_str(
            r#"
            [body]
            margin = 0
            "#,
        );

        assert!(result.is_err());
    }
}
