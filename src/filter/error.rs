use thiserror::Error;

/// Structural problems in the filter text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Invalid filter field {missing} missing")]
    UnbalancedBrackets { missing: char },

    #[error("Invalid filter field syntax ({0})")]
    InvalidFieldSyntax(String),

    #[error("Invalid filter comparator 'OR' or 'AND' missing (^) in '{left} ^ {right}'")]
    MissingOperator { left: String, right: String },

    #[error("Invalid filter syntax at '{0}'")]
    UnexpectedToken(String),

    #[error("Filter is {length} characters long, the limit is {limit}")]
    TooLong { length: usize, limit: usize },

    #[error("Filter nests brackets deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// The filter names a field the entity does not expose
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid filter field {0}")]
    UnknownField(String),
}

/// A literal that does not fit its field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Invalid value {literal} for {field}")]
    InvalidValue { literal: String, field: String },

    #[error("Invalid filter comparator {comparator} for {field}")]
    IllegalComparator { comparator: String, field: String },
}

/// Any error produced while parsing a filter expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Value(#[from] ValueError),
}
