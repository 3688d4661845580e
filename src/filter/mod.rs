//! Filter expression parsing and compilation
//!
//! Clients filter collections with a small textual language instead of raw
//! SQL. A filter is parsed against the fields of one entity, then compiled to
//! a parameterized `where` fragment.
//!
//! # Syntax
//!
//! ```text
//! field comparator value               A single condition, no brackets
//! (condition) and (condition) or ...   Bracketed conditions joined left to right
//! ```
//!
//! Comparators are `eq`, `ne`, `gt`, `lt` and `like`; operators are `and` and
//! `or`. Both are case-insensitive. `and` and `or` have no precedence over each
//! other: `(a) or (b) and (c)` means `((a) or (b)) and (c)`. Use brackets for
//! any other grouping. Nesting deeper than the configured `max_depth` is
//! rejected.
//!
//! Values may be wrapped in single quotes, which lets them contain spaces and
//! parentheses. Nested fields are addressed with dots.
//!
//! # Examples
//!
//! ```text
//! Calories gt 500
//! (EntryUser.FirstName like 'Jo%') and (EntryDateTime gt '2019-02-20')
//! ((Calories lt 100) or (Calories gt 900)) and (WithInDailyLimit eq false)
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod value;

pub use ast::{BooleanOp, Comparator, CompoundCondition, FieldCondition, FilterNode};
pub use compiler::{CompiledFilter, PARAM_PREFIX, QueryParam, compile};
pub use error::{FieldError, FilterError, SyntaxError, ValueError};
pub use parser::{FilterParser, parse};
pub use registry::{FieldInfo, FieldMap, fields_for};
pub use value::{EnumShape, TypedValue, ValueKind};
