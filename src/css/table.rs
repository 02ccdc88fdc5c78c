//! Style table: the fixed set of named styles and their state variants.
//!
//! The table is compiled from stylesheets once at engine start and is
//! read-only afterwards. Base styles occupy the first ids, one per
//! [`StyleName`]; a state rule such as `button:active` allocates a variant
//! style `button-active` and links it from the base.

use std::collections::HashMap;

use crate::css::color::Rgba;
use crate::css::model::{DeclarationValue, Item, StyleSheet};
use crate::css::parser::{parse_css, ParseError};
use crate::css::properties::{apply_declaration, PropertyError};
use crate::css::style::{SelectorFlags, Style, StyleState};
use crate::css::theme::DEFAULT_THEME;

/// Errors from compiling stylesheets into a [`StyleTable`].
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error("unknown style: {0}")]
    UnknownStyle(String),
    #[error("unknown state: {0}")]
    UnknownState(String),
    #[error("undefined variable: ${0}")]
    UndefinedVariable(String),
}

/// Index of a style in the [`StyleTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(usize);

impl StyleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The base styles every table provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Background,
    Button,
    SuggestedAction,
    TextEntry,
    Label,
    TitleLabel,
    /// Colors of selected text.
    Selection,
}

impl StyleName {
    pub const ALL: [StyleName; 7] = [
        StyleName::Background,
        StyleName::Button,
        StyleName::SuggestedAction,
        StyleName::TextEntry,
        StyleName::Label,
        StyleName::TitleLabel,
        StyleName::Selection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Background => "background",
            StyleName::Button => "button",
            StyleName::SuggestedAction => "suggested-action",
            StyleName::TextEntry => "text-entry",
            StyleName::Label => "label",
            StyleName::TitleLabel => "title-label",
            StyleName::Selection => "selection",
        }
    }

    pub fn from_name(name: &str) -> Option<StyleName> {
        StyleName::ALL.into_iter().find(|n| n.as_str() == name)
    }

    /// Id of the base style in any table.
    pub fn id(self) -> StyleId {
        StyleId(self as usize)
    }
}

impl From<StyleName> for StyleId {
    fn from(name: StyleName) -> Self {
        name.id()
    }
}

/// Compiled style records indexed by [`StyleId`].
#[derive(Debug, Clone)]
pub struct StyleTable {
    /// Properties exactly as declared, per style.
    declared: Vec<Style>,
    /// For variant styles, the base they inherit from.
    parents: Vec<Option<StyleId>>,
    /// Declared styles with variants layered over their base.
    resolved: Vec<Style>,
    /// Variables seen so far, already substituted.
    variables: HashMap<String, Vec<DeclarationValue>>,
}

impl StyleTable {
    /// A table with every base style present and empty.
    pub fn empty() -> Self {
        let declared: Vec<Style> = StyleName::ALL
            .iter()
            .map(|name| Style::named(name.as_str()))
            .collect();
        Self {
            parents: vec![None; declared.len()],
            resolved: declared.clone(),
            declared,
            variables: HashMap::new(),
        }
    }

    /// A table compiled from the built-in theme.
    pub fn with_default_theme() -> Result<Self, StyleError> {
        let mut table = Self::empty();
        table.apply_css(DEFAULT_THEME)?;
        Ok(table)
    }

    /// Parse `css` and apply it on top of the current table.
    pub fn apply_css(&mut self, css: &str) -> Result<(), StyleError> {
        let sheet = parse_css(css)?;
        self.apply_sheet(&sheet)
    }

    /// Apply a parsed stylesheet on top of the current table. Later
    /// declarations override earlier ones.
    pub fn apply_sheet(&mut self, sheet: &StyleSheet) -> Result<(), StyleError> {
        for item in &sheet.items {
            match item {
                Item::Variable(def) => {
                    let values = self.substitute(&def.values)?;
                    self.variables.insert(def.name.clone(), values);
                }
                Item::Rule(rule) => {
                    let mut targets = Vec::with_capacity(rule.selectors.len());
                    for selector in &rule.selectors {
                        let name = StyleName::from_name(&selector.name)
                            .ok_or_else(|| StyleError::UnknownStyle(selector.name.clone()))?;
                        let id = match &selector.state {
                            None => name.id(),
                            Some(state_name) => {
                                let state = StyleState::from_name(state_name)
                                    .ok_or_else(|| StyleError::UnknownState(state_name.clone()))?;
                                self.variant_slot(name, state)
                            }
                        };
                        targets.push(id);
                    }

                    for decl in &rule.declarations {
                        let values = self.substitute(&decl.values)?;
                        for id in &targets {
                            apply_declaration(&mut self.declared[id.0], &decl.property, &values)?;
                        }
                    }
                }
            }
        }

        self.resolve_all();
        Ok(())
    }

    /// Id of the variant of `name` for `state`, allocating it if needed.
    fn variant_slot(&mut self, name: StyleName, state: StyleState) -> StyleId {
        let base = name.id();
        if let Some(id) = self.declared[base.0].variant(state) {
            return id;
        }
        let id = StyleId(self.declared.len());
        self.declared
            .push(Style::named(format!("{}-{}", name.as_str(), state.as_str())));
        self.parents.push(Some(base));
        self.declared[base.0].variants.set(state, id);
        id
    }

    /// Replace every variable reference, including inside function
    /// arguments.
    fn substitute(&self, values: &[DeclarationValue]) -> Result<Vec<DeclarationValue>, StyleError> {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            match value {
                DeclarationValue::Variable(name) => {
                    let replacement = self
                        .variables
                        .get(name)
                        .ok_or_else(|| StyleError::UndefinedVariable(name.clone()))?;
                    out.extend(replacement.iter().cloned());
                }
                DeclarationValue::Function { name, args } => {
                    let args = args
                        .iter()
                        .map(|arg| self.substitute(arg))
                        .collect::<Result<Vec<_>, _>>()?;
                    out.push(DeclarationValue::Function { name: name.clone(), args });
                }
                other => out.push(other.clone()),
            }
        }
        Ok(out)
    }

    fn resolve_all(&mut self) {
        self.resolved = self
            .declared
            .iter()
            .zip(&self.parents)
            .map(|(style, parent)| match parent {
                Some(base) => self.declared[base.0].merge(style),
                None => style.clone(),
            })
            .collect();
    }

    /// The style record for `id`.
    pub fn get(&self, id: StyleId) -> &Style {
        &self.resolved[id.0]
    }

    /// Look a style up by its full name, e.g. `"button-active"`.
    pub fn find(&self, name: &str) -> Option<StyleId> {
        self.resolved
            .iter()
            .position(|style| style.name == name)
            .map(StyleId)
    }

    /// Number of styles, variants included.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// The effective style for a box with base style `base` in the given
    /// selector state. Precedence: disabled, active, focus, base. States
    /// without a variant are skipped.
    pub fn resolve(&self, base: StyleId, flags: SelectorFlags) -> StyleId {
        let style = self.get(base);
        [StyleState::Disabled, StyleState::Active, StyleState::Focus]
            .into_iter()
            .filter(|state| flags.contains(state.flag()))
            .find_map(|state| style.variant(state))
            .unwrap_or(base)
    }

    /// Text and background color of selected text.
    pub fn selection_colors(&self) -> (Rgba, Rgba) {
        let style = self.get(StyleName::Selection.id());
        (style.color, style.background_color)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
