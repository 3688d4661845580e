use super::error::SyntaxError;
use super::value::TypedValue;
use std::fmt;
use std::str::FromStr;

/// How a field is compared against a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Like,
}

/// Parse a comparator token (`eq`, `ne`, `gt`, `lt`, `like`), ignoring case
impl FromStr for Comparator {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(Comparator::Equals),
            "ne" => Ok(Comparator::NotEquals),
            "gt" => Ok(Comparator::GreaterThan),
            "lt" => Ok(Comparator::LessThan),
            "like" => Ok(Comparator::Like),
            _ => Err(SyntaxError::UnexpectedToken(s.to_string())),
        }
    }
}

impl Comparator {
    pub fn token(&self) -> &'static str {
        match self {
            Comparator::Equals => "eq",
            Comparator::NotEquals => "ne",
            Comparator::GreaterThan => "gt",
            Comparator::LessThan => "lt",
            Comparator::Like => "like",
        }
    }

    /// SQL operator emitted by the compiler
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Equals => "=",
            Comparator::NotEquals => "!=",
            Comparator::GreaterThan => ">",
            Comparator::LessThan => "<",
            Comparator::Like => "like",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Comparator::Equals => "Equals",
            Comparator::NotEquals => "NotEquals",
            Comparator::GreaterThan => "GreaterThan",
            Comparator::LessThan => "LessThan",
            Comparator::Like => "Like",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    And,
    Or,
}

impl FromStr for BooleanOp {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(BooleanOp::And),
            "or" => Ok(BooleanOp::Or),
            _ => Err(SyntaxError::UnexpectedToken(s.to_string())),
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOp::And => f.write_str("And"),
            BooleanOp::Or => f.write_str("Or"),
        }
    }
}

/// A leaf comparison: `<field> <comparator> <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    /// Canonical field path, already aliased for joined entities
    pub field: String,
    pub comparator: Comparator,
    pub value: TypedValue,
    pub has_brackets: bool,
}

/// Two conditions joined by `And`/`Or`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCondition {
    pub left: Box<FilterNode>,
    pub operator: BooleanOp,
    pub right: Box<FilterNode>,
    pub has_brackets: bool,
}

/// A parsed filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Field(FieldCondition),
    Compound(CompoundCondition),
}

impl FilterNode {
    /// A leaf condition. Leaves are bracketed whether or not the client wrote
    /// parentheses, so `Calories lt 20` compiles to `(... < @...)`.
    pub fn field(field: impl Into<String>, comparator: Comparator, value: TypedValue) -> Self {
        FilterNode::Field(FieldCondition {
            field: field.into(),
            comparator,
            value,
            has_brackets: true,
        })
    }

    /// Two conditions joined by `operator`, unbracketed until [`Self::bracketed`]
    pub fn compound(left: FilterNode, operator: BooleanOp, right: FilterNode) -> Self {
        FilterNode::Compound(CompoundCondition {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            has_brackets: false,
        })
    }

    pub fn has_brackets(&self) -> bool {
        match self {
            FilterNode::Field(f) => f.has_brackets,
            FilterNode::Compound(c) => c.has_brackets,
        }
    }

    pub fn set_brackets(&mut self, has_brackets: bool) {
        match self {
            FilterNode::Field(f) => f.has_brackets = has_brackets,
            FilterNode::Compound(c) => c.has_brackets = has_brackets,
        }
    }

    pub fn bracketed(mut self) -> Self {
        self.set_brackets(true);
        self
    }

    /// Restrict `filter` so that only rows matching `guard` can pass
    ///
    /// With no client filter the guard alone is returned. Otherwise the client
    /// filter is bracketed so its own `Or` branches cannot escape the guard.
    pub fn restrict(filter: Option<FilterNode>, guard: FilterNode) -> FilterNode {
        match filter {
            None => guard,
            Some(filter) => {
                FilterNode::compound(guard.bracketed(), BooleanOp::And, filter.bracketed())
                    .bracketed()
            }
        }
    }

    /// Number of field conditions in the tree
    pub fn condition_count(&self) -> usize {
        match self {
            FilterNode::Field(_) => 1,
            FilterNode::Compound(c) => c.left.condition_count() + c.right.condition_count(),
        }
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNode::Field(cond) => write!(
                f,
                "({}:{}:{}::{})",
                cond.field,
                cond.comparator,
                cond.value,
                cond.value.kind()
            ),
            FilterNode::Compound(cond) => {
                if cond.has_brackets {
                    write!(f, "({}:{}:{})", cond.left, cond.operator, cond.right)
                } else {
                    write!(f, "{}:{}:{}", cond.left, cond.operator, cond.right)
                }
            }
        }
    }
}
