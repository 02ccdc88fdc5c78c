//! Stylesheet AST: Selector, Declaration, RuleSet, VariableDef.

/// A rule selector: a style name with an optional state suffix.
///
/// `button` is `Selector { name: "button", state: None }` and
/// `text-entry:focus` is `Selector { name: "text-entry", state: Some("focus") }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub name: String,
    pub state: Option<String>,
}

impl Selector {
    /// A selector for a base style.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), state: None }
    }

    /// A selector for a state variant of a style.
    pub fn with_state(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self { name: name.into(), state: Some(state.into()) }
    }
}

/// A value token within a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationValue {
    /// An identifier like `inset`, `bold`, `center`.
    Ident(String),
    /// A bare number like `1`, `0.96`.
    Number(f64),
    /// A number with a unit suffix like `3px`, `9pt`.
    Dimension(f64, String),
    /// A hex color string (without the `#` prefix), e.g. `"3d9bda"`.
    Color(String),
    /// A quoted string value.
    String(String),
    /// A variable reference (without the `$` prefix), e.g. `"accent"`.
    Variable(String),
    /// A function call: `shade($base, 0.96)`. Each argument is the list of
    /// values between two commas.
    Function {
        name: String,
        args: Vec<Vec<DeclarationValue>>,
    },
    /// A top-level `,` separating list items, as in multiple box shadows.
    Comma,
}

/// A single property declaration, e.g. `padding: 3px 12px`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, e.g. `"padding"`.
    pub property: String,
    /// The declaration values.
    pub values: Vec<DeclarationValue>,
}

impl Declaration {
    pub fn new(property: impl Into<String>, values: Vec<DeclarationValue>) -> Self {
        Self { property: property.into(), values }
    }
}

/// A rule: one or more selectors paired with declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// The selectors for this rule (comma-separated in source).
    pub selectors: Vec<Selector>,
    /// The property declarations inside the `{ ... }` block.
    pub declarations: Vec<Declaration>,
}

/// A top-level variable definition: `$accent: #3d9bda;`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub values: Vec<DeclarationValue>,
}

/// One top-level item, kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Variable(VariableDef),
    Rule(RuleSet),
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub items: Vec<Item>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Iterate over the rules, skipping variable definitions.
    pub fn rules(&self) -> impl Iterator<Item = &RuleSet> {
        self.items.iter().filter_map(|item| match item {
            Item::Rule(rule) => Some(rule),
            Item::Variable(_) => None,
        })
    }

    /// Iterate over the variable definitions in source order.
    pub fn variables(&self) -> impl Iterator<Item = &VariableDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Variable(def) => Some(def),
            Item::Rule(_) => None,
        })
    }
}

/// Split a value list on top-level [`DeclarationValue::Comma`] separators.
pub fn split_list(values: &[DeclarationValue]) -> Vec<&[DeclarationValue]> {
    values
        .split(|v| matches!(v, DeclarationValue::Comma))
        .filter(|part| !part.is_empty())
        .collect()
}
