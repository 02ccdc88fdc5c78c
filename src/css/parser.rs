//! Recursive descent stylesheet parser.
//!
//! Parses stylesheet text into a [`StyleSheet`] of variable definitions and
//! rule sets. Uses the logos-based tokenizer from [`crate::css::tokenizer`].
//!
//! ```text
//! sheet     := (variable | rule)*
//! variable  := VARIABLE ':' values ';'
//! rule      := selector (',' selector)* '{' declaration* '}'
//! selector  := IDENT (':' IDENT)?
//! decl      := IDENT ':' values ';'?
//! values    := (value | ',')*
//! value     := NUMBER | DIMENSION | IDENT | HEX | STRING | VARIABLE
//!            | FUNCTION values ')'
//! ```

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from stylesheet parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
}

/// Strip block comments (`/* ... */`) from the input, replacing each
/// comment with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            // Unterminated comment consumes the rest of the input.
            None => rest = "",
        }
    }
    result.push_str(rest);

    result
}

/// Tokenize input using logos, numbering tokens for error positions.
fn tokenize_positioned(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span].to_string(),
                token,
                pos: tokens.len(),
            });
        }
    }

    tokens
}

/// Parse a stylesheet string into a [`StyleSheet`].
pub fn parse_css(input: &str) -> Result<StyleSheet, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_positioned(&cleaned);

    let mut parser = Parser { tokens, cursor: 0 };

    let mut items = Vec::new();
    while !parser.is_eof() {
        items.push(parser.parse_item()?);
    }

    Ok(StyleSheet { items })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!(
                    "expected {:?}, got {:?} '{}'",
                    expected, tok.token, tok.text
                ),
            }),
            None => Err(ParseError::UnexpectedEof(format!(
                "expected {:?}",
                expected
            ))),
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {what}")))?;
        if tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            });
        }
        Ok(tok.text.clone())
    }

    /// Parse one top-level item: a variable definition or a rule.
    fn parse_item(&mut self) -> Result<Item, ParseError> {
        if self.peek_is(&Token::Variable) {
            Ok(Item::Variable(self.parse_variable()?))
        } else {
            Ok(Item::Rule(self.parse_rule()?))
        }
    }

    /// Parse `$name: values;`.
    fn parse_variable(&mut self) -> Result<VariableDef, ParseError> {
        let tok = self.expect(&Token::Variable)?;
        let name = tok.text.strip_prefix('$').unwrap_or(&tok.text).to_string();
        self.expect(&Token::Colon)?;
        let values = self.parse_values()?;
        if values.is_empty() {
            return Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("variable ${name} has no value"),
            });
        }
        self.expect(&Token::Semicolon)?;
        Ok(VariableDef { name, values })
    }

    /// Parse a single rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(RuleSet {
            selectors,
            declarations,
        })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];

        while self.peek_is(&Token::Comma) {
            self.advance(); // consume comma
            selectors.push(self.parse_selector()?);
        }

        Ok(selectors)
    }

    /// Parse `name` or `name:state`.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let name = self.expect_ident("style name")?;
        if self.peek_is(&Token::Colon) {
            self.advance();
            let state = self.expect_ident("state name after ':'")?;
            return Ok(Selector::with_state(name, state));
        }
        Ok(Selector::new(name))
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        while self.peek().is_some_and(|t| t.token != Token::BraceClose) {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse a single declaration: `property: value1 value2;`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.expect_ident("property name")?;
        self.expect(&Token::Colon)?;
        let values = self.parse_values()?;

        // Consume optional semicolon
        if self.peek_is(&Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration { property, values })
    }

    /// Parse values until `;`, `}`, `)` or end of input.
    fn parse_values(&mut self) -> Result<Vec<DeclarationValue>, ParseError> {
        let mut values = Vec::new();
        loop {
            match self.peek().map(|t| &t.token) {
                None
                | Some(Token::Semicolon)
                | Some(Token::BraceClose)
                | Some(Token::ParenClose) => break,
                Some(Token::Comma) => {
                    self.advance();
                    values.push(DeclarationValue::Comma);
                }
                Some(_) => values.push(self.parse_declaration_value()?),
            }
        }
        Ok(values)
    }

    /// Parse a single value token into a [`DeclarationValue`].
    fn parse_declaration_value(&mut self) -> Result<DeclarationValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected declaration value".into()))?
            .clone();

        match &tok.token {
            Token::Number => {
                let n: f64 = tok.text.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid number: {}", tok.text),
                })?;
                Ok(DeclarationValue::Number(n))
            }
            Token::Dimension => {
                let text = &tok.text;
                let (num_str, unit_str) =
                    split_dimension(text).ok_or_else(|| ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("invalid dimension: {text}"),
                    })?;
                let n: f64 = num_str.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid number in dimension: {num_str}"),
                })?;
                Ok(DeclarationValue::Dimension(n, unit_str.to_string()))
            }
            Token::Ident => Ok(DeclarationValue::Ident(tok.text.clone())),
            Token::HexColor => {
                // Strip the leading '#' for DeclarationValue::Color
                let hex = tok.text.strip_prefix('#').unwrap_or(&tok.text);
                Ok(DeclarationValue::Color(hex.to_string()))
            }
            Token::StringLiteral | Token::StringLiteralSingle => {
                // Strip surrounding quotes
                let inner = &tok.text[1..tok.text.len() - 1];
                Ok(DeclarationValue::String(inner.to_string()))
            }
            Token::Variable => {
                let name = tok.text.strip_prefix('$').unwrap_or(&tok.text);
                Ok(DeclarationValue::Variable(name.to_string()))
            }
            Token::Function => {
                let name = tok.text.trim_end_matches('(').to_string();
                let inner = self.parse_values()?;
                self.expect(&Token::ParenClose)?;
                let args = split_list(&inner).into_iter().map(<[_]>::to_vec).collect();
                Ok(DeclarationValue::Function { name, args })
            }
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!(
                    "unexpected token in declaration value: {:?} '{}'",
                    other, tok.text
                ),
            }),
        }
    }
}

/// Split a dimension string like "3px" or "50%" into (number_part, unit_part).
fn split_dimension(s: &str) -> Option<(&str, &str)> {
    let unit_start = s
        .char_indices()
        .find(|(i, c)| !c.is_ascii_digit() && *c != '.' && !(*c == '-' && *i == 0))
        .map(|(i, _)| i)?;

    if unit_start == 0 || unit_start >= s.len() {
        return None;
    }

    Some((&s[..unit_start], &s[unit_start..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Helper ───────────────────────────────────────────────────────

    fn parse(input: &str) -> StyleSheet {
        parse_css(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn first_rule(input: &str) -> RuleSet {
        let sheet = parse(input);
        let rule = sheet.rules().next().cloned().expect("expected at least one rule");
        rule
    }

    // ── Simple rule ──────────────────────────────────────────────────

    #[test]
    fn parse_simple_rule() {
        let rule = first_rule("label { color: #333333; }");
        assert_eq!(rule.selectors, vec![Selector::new("label")]);
        assert_eq!(
            rule.declarations,
            vec![Declaration::new("color", vec![DeclarationValue::Color("333333".into())])]
        );
    }

    // ── State selectors ──────────────────────────────────────────────

    #[test]
    fn parse_state_selector() {
        let rule = first_rule("text-entry:focus { border-color: #3d9bda; }");
        assert_eq!(rule.selectors, vec![Selector::with_state("text-entry", "focus")]);
    }

    #[test]
    fn parse_multiple_selectors() {
        let rule = first_rule("button, button:disabled { border-width: 1px; }");
        assert_eq!(
            rule.selectors,
            vec![Selector::new("button"), Selector::with_state("button", "disabled")]
        );
    }

    #[test]
    fn parse_selector_missing_state_name() {
        assert!(parse_css("button: { }").is_err());
    }

    // ── Values ───────────────────────────────────────────────────────

    #[test]
    fn parse_dimensions_and_numbers() {
        let rule = first_rule("button { padding: 3px 12px; border-radius: 2.5; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![
                DeclarationValue::Dimension(3.0, "px".into()),
                DeclarationValue::Dimension(12.0, "px".into()),
            ]
        );
        assert_eq!(rule.declarations[1].values, vec![DeclarationValue::Number(2.5)]);
    }

    #[test]
    fn parse_comma_list() {
        let rule = first_rule("button { box-shadow: inset 0 1px, 0 -1px; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![
                DeclarationValue::Ident("inset".into()),
                DeclarationValue::Number(0.0),
                DeclarationValue::Dimension(1.0, "px".into()),
                DeclarationValue::Comma,
                DeclarationValue::Number(0.0),
                DeclarationValue::Dimension(-1.0, "px".into()),
            ]
        );
    }

    #[test]
    fn parse_nested_functions() {
        let rule = first_rule("x { color: alpha(shade($bg, 1.4), 0.4); }");
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::Function {
                name: "alpha".into(),
                args: vec![
                    vec![DeclarationValue::Function {
                        name: "shade".into(),
                        args: vec![
                            vec![DeclarationValue::Variable("bg".into())],
                            vec![DeclarationValue::Number(1.4)],
                        ],
                    }],
                    vec![DeclarationValue::Number(0.4)],
                ],
            }]
        );
    }

    #[test]
    fn parse_unclosed_function() {
        assert!(parse_css("x { color: rgb(1, 2, 3; }").is_err());
    }

    #[test]
    fn parse_string_value() {
        let rule = first_rule(r#"label { font-family: "Open Sans"; }"#);
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::String("Open Sans".into())]
        );
    }

    // ── Variables ────────────────────────────────────────────────────

    #[test]
    fn parse_variable_definition() {
        let sheet = parse("$accent: #3d9bda; label { color: $accent; }");
        let vars: Vec<_> = sheet.variables().cloned().collect();
        assert_eq!(
            vars,
            vec![VariableDef {
                name: "accent".into(),
                values: vec![DeclarationValue::Color("3d9bda".into())],
            }]
        );
        let rule = sheet.rules().next().unwrap();
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::Variable("accent".into())]
        );
    }

    #[test]
    fn parse_variable_requires_semicolon() {
        assert!(matches!(
            parse_css("$a: 1"),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn parse_empty_variable_is_error() {
        assert!(parse_css("$a: ;").is_err());
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn parse_declaration_without_trailing_semicolon() {
        let rule = first_rule("label { color: #fff }");
        assert_eq!(rule.declarations.len(), 1);
    }

    #[test]
    fn parse_unclosed_brace() {
        let result = parse_css("label { color: #fff;");
        assert!(matches!(result, Err(ParseError::UnexpectedEof(_))));
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse("").items.is_empty());
    }

    #[test]
    fn parse_with_comments() {
        let sheet = parse("/* theme */ label { /* text */ color: #fff; }");
        assert_eq!(sheet.rules().count(), 1);
        assert_eq!(sheet.rules().next().unwrap().declarations.len(), 1);
    }

    // ── strip_comments ───────────────────────────────────────────────

    #[test]
    fn strip_comments_basic() {
        assert_eq!(strip_comments("a /* b */ c"), "a   c");
    }

    #[test]
    fn strip_comments_unterminated() {
        assert_eq!(strip_comments("a /* b"), "a  ");
    }

    #[test]
    fn strip_comments_no_comments() {
        assert_eq!(strip_comments("label {}"), "label {}");
    }

    // ── split_dimension ──────────────────────────────────────────────

    #[test]
    fn split_dimension_px() {
        assert_eq!(split_dimension("2.5px"), Some(("2.5", "px")));
    }

    #[test]
    fn split_dimension_negative() {
        assert_eq!(split_dimension("-1px"), Some(("-1", "px")));
    }

    #[test]
    fn split_dimension_percent() {
        assert_eq!(split_dimension("50%"), Some(("50", "%")));
    }
}
