use super::ast::{BooleanOp, Comparator, FilterNode};
use super::error::{FieldError, FilterError, SyntaxError};
use super::lexer::{tokenize, validate_brackets};
use super::registry::{FieldMap, fields_for};
use super::value::{check_comparator, coerce};
use crate::config::{DEFAULT_MAX_DEPTH, FilterRules};
use crate::entity::EntityShape;

/// Parse a filter expression against the fields of `shape`
///
/// Empty or whitespace-only input means "no filter" and yields `None`.
pub fn parse(text: &str, shape: &'static EntityShape) -> Result<Option<FilterNode>, FilterError> {
    FilterParser::default().parse(text, shape)
}

/// Filter parser with an optional limit on input length and a limit on
/// bracket nesting
#[derive(Debug, Clone)]
pub struct FilterParser {
    max_length: Option<usize>,
    max_depth: usize,
}

impl Default for FilterParser {
    fn default() -> Self {
        Self {
            max_length: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FilterParser {
    pub fn new(rules: &FilterRules) -> Self {
        Self {
            max_length: Some(rules.max_length),
            max_depth: rules.max_depth,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(
        &self,
        text: &str,
        shape: &'static EntityShape,
    ) -> Result<Option<FilterNode>, FilterError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if let Some(limit) = self.max_length {
            let length = text.chars().count();
            if length > limit {
                return Err(SyntaxError::TooLong { length, limit }.into());
            }
        }

        validate_brackets(text)?;

        let fields = fields_for(shape);
        let node = ExpressionParser {
            shape,
            fields: &fields,
            max_depth: self.max_depth,
        }
        .parse_expression(text, 0)?;

        tracing::debug!(
            entity = shape.name,
            conditions = node.condition_count(),
            "Filter parsed"
        );
        Ok(Some(node))
    }
}

struct ExpressionParser<'f> {
    shape: &'static EntityShape,
    fields: &'f FieldMap,
    max_depth: usize,
}

impl ExpressionParser<'_> {
    /// `depth` is the number of enclosing bracket groups
    fn parse_expression(&self, text: &str, depth: usize) -> Result<FilterNode, FilterError> {
        let tokens = tokenize(text);
        if tokens.saw_bracket {
            self.parse_chain(text, &tokens.tokens, depth)
        } else {
            self.parse_condition(text, &tokens.tokens)
        }
    }

    /// `(expr) op (expr) op ...`, folded left to right without precedence
    fn parse_chain(
        &self,
        text: &str,
        tokens: &[&str],
        depth: usize,
    ) -> Result<FilterNode, FilterError> {
        let mut current: Option<FilterNode> = None;
        let mut pending: Option<(FilterNode, BooleanOp)> = None;

        for (i, token) in tokens.iter().enumerate() {
            if let Some(inner) = sub_expression(token) {
                if current.is_some() {
                    return Err(SyntaxError::MissingOperator {
                        left: tokens[i - 1].to_string(),
                        right: token.to_string(),
                    }
                    .into());
                }
                if depth >= self.max_depth {
                    return Err(SyntaxError::TooDeep {
                        limit: self.max_depth,
                    }
                    .into());
                }
                let node = self.parse_expression(inner, depth + 1)?.bracketed();
                current = Some(match pending.take() {
                    Some((left, op)) => FilterNode::compound(left, op, node),
                    None => node,
                });
            } else if let Ok(op) = token.parse::<BooleanOp>() {
                let left = match current.take() {
                    Some(left) if i + 1 < tokens.len() => left,
                    _ => return Err(SyntaxError::UnexpectedToken(token.to_string()).into()),
                };
                pending = Some((left, op));
            } else {
                return Err(SyntaxError::UnexpectedToken(token.to_string()).into());
            }
        }

        current.ok_or_else(|| FilterError::from(SyntaxError::UnexpectedToken(text.to_string())))
    }

    /// `field comparator value`
    fn parse_condition(&self, text: &str, tokens: &[&str]) -> Result<FilterNode, FilterError> {
        let [field, comparator_token, literal] = tokens else {
            return Err(SyntaxError::InvalidFieldSyntax(text.to_string()).into());
        };

        let comparator: Comparator = comparator_token.parse()?;
        let info = self
            .fields
            .get(field)
            .ok_or_else(|| FieldError::UnknownField(field.to_string()))?;
        let value = coerce(field, info.kind, literal)?;
        check_comparator(field, info.kind, comparator, comparator_token)?;

        let path = if self.shape.joined && !info.path.contains('.') {
            format!("{}.{}", self.shape.name, info.path)
        } else {
            info.path.clone()
        };
        Ok(FilterNode::field(path, comparator, value))
    }
}

/// Content of a `( ... )` token, if it is one
fn sub_expression(token: &str) -> Option<&str> {
    if token.len() > 2 && token.starts_with('(') && token.ends_with(')') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}
