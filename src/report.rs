use crate::entity::EntityKind;
use crate::filter::{CompiledFilter, FieldMap, FilterNode, QueryParam};
use crate::query::SearchStatement;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::{Value, json};
use std::fmt::Write;

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

pub fn format_check_text(entity: EntityKind, node: Option<&FilterNode>) -> String {
    let mut out = String::new();
    match node {
        None => {
            let _ = writeln!(out, "No filter: every {entity} matches");
        }
        Some(node) => {
            let _ = writeln!(out, "{} {}", "Entity:".bold(), entity);
            let _ = writeln!(out, "{} {}", "Conditions:".bold(), node.condition_count());
            let _ = writeln!(out, "{} {}", "Tree:".bold(), node);
        }
    }
    out
}

pub fn check_json(entity: EntityKind, node: Option<&FilterNode>) -> Value {
    json!({
        "entity": entity.to_string(),
        "valid": true,
        "conditions": node.map_or(0, FilterNode::condition_count),
        "tree": node.map(|n| n.to_string()),
    })
}

pub fn format_compiled_text(compiled: &CompiledFilter) -> String {
    let mut out = String::new();
    if compiled.is_empty() {
        let _ = writeln!(out, "(no filter)");
        return out;
    }
    let _ = writeln!(out, "{}", compiled.text);
    write_parameters(&mut out, &compiled.parameters);
    out
}

pub fn compiled_json(compiled: &CompiledFilter) -> Value {
    json!({
        "text": compiled.text,
        "parameters": parameters_json(&compiled.parameters),
    })
}

pub fn format_search_text(stmt: &SearchStatement) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Select:".bold());
    let _ = writeln!(out, "  {}", stmt.select);
    let _ = writeln!(out, "{}", "Count:".bold());
    let _ = writeln!(out, "  {}", stmt.count);
    write_parameters(&mut out, &stmt.select_parameters);
    out
}

pub fn search_json(stmt: &SearchStatement) -> Value {
    json!({
        "select": stmt.select,
        "count": stmt.count,
        "select_parameters": parameters_json(&stmt.select_parameters),
        "count_parameters": parameters_json(&stmt.count_parameters),
    })
}

pub fn format_fields_text(entity: EntityKind, fields: &FieldMap) -> String {
    let mut table = create_styled_table(&["Field", "Kind", "Comparators"]);
    for info in fields.sorted() {
        let comparators = info
            .kind
            .allowed_comparators()
            .iter()
            .map(|c| c.token())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&info.path),
            Cell::new(info.kind),
            Cell::new(comparators),
        ]);
    }
    format!(
        "{} {} ({} fields)\n{table}\n",
        "Filterable fields of".bold(),
        entity,
        fields.len()
    )
}

pub fn fields_json(entity: EntityKind, fields: &FieldMap) -> Value {
    let fields: Vec<Value> = fields
        .sorted()
        .into_iter()
        .map(|info| {
            json!({
                "path": info.path,
                "kind": info.kind.to_string(),
                "comparators": info
                    .kind
                    .allowed_comparators()
                    .iter()
                    .map(|c| c.token())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({ "entity": entity.to_string(), "fields": fields })
}

fn write_parameters(out: &mut String, parameters: &[QueryParam]) {
    if parameters.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", "Parameters:".bold());
    for param in parameters {
        let _ = writeln!(
            out,
            "  {} = {} ({})",
            param.placeholder().cyan(),
            param.value,
            param.value.db_type()
        );
    }
}

fn parameters_json(parameters: &[QueryParam]) -> Vec<Value> {
    parameters
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "type": p.value.db_type(),
                "value": p.value.to_json(),
            })
        })
        .collect()
}
