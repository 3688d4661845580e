//! Static descriptions of the filterable entities
//!
//! Each entity is described by an [`EntityShape`]: its member names and value
//! kinds, nested records, and the queries used to search it. The field
//! registry walks these shapes instead of inspecting types at runtime.

mod shapes;

pub use shapes::{CALORIES_STATUS, MEAL_ENTRY, MEAL_ITEM, USER, USER_ROLE};

use crate::filter::ast::{Comparator, FilterNode};
use crate::filter::value::{TypedValue, ValueKind};
use crate::query::SearchSource;
use clap::ValueEnum;
use std::fmt;

/// Members that are never filterable, at any nesting depth
pub const IGNORED_MEMBERS: &[&str] = &["DateUpdated", "Password", "CaloriesStatus"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Value(ValueKind),
    Record(&'static EntityShape),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub kind: MemberKind,
}

impl Member {
    pub const fn value(name: &'static str, kind: ValueKind) -> Self {
        Member {
            name,
            kind: MemberKind::Value(kind),
        }
    }

    pub const fn record(name: &'static str, shape: &'static EntityShape) -> Self {
        Member {
            name,
            kind: MemberKind::Record(shape),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntityShape {
    /// Type name, also used as the table alias for joined queries
    pub name: &'static str,
    pub members: &'static [Member],
    /// Searched through a multi-table join; undotted fields get `<name>.` prepended
    pub joined: bool,
    /// Field holding the id of the owning user, used to scope searches
    pub owner_field: Option<&'static str>,
    pub search: SearchSource,
}

impl EntityShape {
    /// Condition limiting results to rows owned by `owner_id`
    pub fn owner_guard(&self, owner_id: i64) -> Option<FilterNode> {
        self.owner_field.map(|field| {
            FilterNode::field(field, Comparator::Equals, TypedValue::Int64(owner_id))
        })
    }
}

/// The entities a client can search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum EntityKind {
    User,
    MealEntry,
    MealItem,
}

impl EntityKind {
    pub fn shape(&self) -> &'static EntityShape {
        match self {
            EntityKind::User => &USER,
            EntityKind::MealEntry => &MEAL_ENTRY,
            EntityKind::MealItem => &MEAL_ITEM,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape().name)
    }
}
