use super::ast::FilterNode;
use super::value::TypedValue;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Prefix marking a named parameter in compiled text
pub const PARAM_PREFIX: char = '@';

/// A value bound to a named placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParam {
    pub name: String,
    pub value: TypedValue,
}

impl QueryParam {
    pub fn new(name: impl Into<String>, value: TypedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The placeholder as it appears in query text, e.g. `@Calories`
    pub fn placeholder(&self) -> String {
        format!("{PARAM_PREFIX}{}", self.name)
    }
}

/// A `where` fragment and its parameters, in placeholder order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    pub text: String,
    pub parameters: Vec<QueryParam>,
}

impl CompiledFilter {
    /// True when there is no filter to apply; callers must not add a `where`
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Render a filter tree to a parameterized `where` fragment
///
/// Values never appear in the text, only placeholders. Parameter names are
/// unique within one call; nothing carries over between calls.
pub fn compile(node: Option<&FilterNode>) -> CompiledFilter {
    let Some(node) = node else {
        return CompiledFilter::default();
    };

    let mut compiler = Compiler::default();
    let mut text = String::from("where ");
    compiler.render(node, &mut text);

    tracing::debug!(parameters = compiler.parameters.len(), "Filter compiled");
    CompiledFilter {
        text,
        parameters: compiler.parameters,
    }
}

#[derive(Default)]
struct Compiler {
    names: ParamNames,
    parameters: Vec<QueryParam>,
}

impl Compiler {
    fn render(&mut self, node: &FilterNode, out: &mut String) {
        if node.has_brackets() {
            out.push('(');
        }
        match node {
            FilterNode::Field(cond) => {
                let param = QueryParam::new(self.names.next(&cond.field), cond.value.clone());
                let _ = write!(
                    out,
                    "{} {} {}",
                    cond.field,
                    cond.comparator.symbol(),
                    param.placeholder()
                );
                self.parameters.push(param);
            }
            FilterNode::Compound(cond) => {
                self.render(&cond.left, out);
                let _ = write!(out, " {} ", cond.operator);
                self.render(&cond.right, out);
            }
        }
        if node.has_brackets() {
            out.push(')');
        }
    }
}

/// Hands out parameter names derived from field paths
#[derive(Default)]
struct ParamNames {
    uses: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl ParamNames {
    /// `EntryUser.Id` gives `EntryUserId`, then `EntryUserId1`, `EntryUserId2`, ...
    fn next(&mut self, field: &str) -> String {
        let base: String = field.chars().filter(|c| *c != '.').collect();
        let count = self.uses.entry(base.clone()).or_insert(0);

        let mut name = if *count == 0 {
            base.clone()
        } else {
            format!("{base}{count}")
        };
        while self.issued.contains(&name) {
            *count += 1;
            name = format!("{base}{count}");
        }
        *count += 1;

        self.issued.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_names_count_per_base() {
        let mut names = ParamNames::default();
        assert_eq!(names.next("Distance"), "Distance");
        assert_eq!(names.next("Distance"), "Distance1");
        assert_eq!(names.next("MealEntry.Id"), "MealEntryId");
        assert_eq!(names.next("Distance"), "Distance2");
    }

    #[test]
    fn test_param_names_skip_taken_names() {
        let mut names = ParamNames::default();
        assert_eq!(names.next("Age1"), "Age1");
        assert_eq!(names.next("Age"), "Age");
        assert_eq!(names.next("Age"), "Age2");
    }

    #[test]
    fn test_dotted_and_flat_paths_do_not_collide() {
        let mut names = ParamNames::default();
        assert_eq!(names.next("EntryUser.Id"), "EntryUserId");
        assert_eq!(names.next("EntryUserId"), "EntryUserId1");
    }

    #[test]
    fn test_placeholder() {
        let param = QueryParam::new("Calories", TypedValue::Float64(1.5));
        assert_eq!(param.placeholder(), "@Calories");
    }
}
