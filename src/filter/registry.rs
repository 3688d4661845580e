use super::value::ValueKind;
use crate::entity::{EntityShape, IGNORED_MEMBERS, MemberKind};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static FIELD_MAPS: LazyLock<RwLock<HashMap<&'static str, Arc<FieldMap>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// A filterable field of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Dotted path with the entity's own casing, e.g. `EntryUser.FirstName`
    pub path: String,
    pub kind: ValueKind,
}

/// Filterable fields of one entity, keyed by lower-cased path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: HashMap<String, FieldInfo>,
}

impl FieldMap {
    /// Build the map by walking `shape` depth-first
    pub fn build(shape: &EntityShape) -> Self {
        let mut map = FieldMap::default();
        map.collect(shape, None);
        map
    }

    fn collect(&mut self, shape: &EntityShape, prefix: Option<&str>) {
        for member in shape.members {
            if IGNORED_MEMBERS.contains(&member.name) {
                continue;
            }
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{}", member.name),
                None => member.name.to_string(),
            };
            match member.kind {
                MemberKind::Value(kind) => {
                    self.fields
                        .insert(path.to_lowercase(), FieldInfo { path, kind });
                }
                MemberKind::Record(nested) => self.collect(nested, Some(&path)),
            }
        }
    }

    /// Case-insensitive lookup of a field path
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields sorted by canonical path
    pub fn sorted(&self) -> Vec<&FieldInfo> {
        let mut fields: Vec<&FieldInfo> = self.fields.values().collect();
        fields.sort_by(|a, b| a.path.cmp(&b.path));
        fields
    }
}

/// Filterable fields of `shape`, built on first use and cached for the process
///
/// Concurrent first calls may each build the map; the first one stored wins.
pub fn fields_for(shape: &'static EntityShape) -> Arc<FieldMap> {
    if let Some(map) = FIELD_MAPS.read().get(shape.name) {
        return Arc::clone(map);
    }

    let built = FieldMap::build(shape);
    tracing::debug!(entity = shape.name, fields = built.len(), "Field map built");

    let mut maps = FIELD_MAPS.write();
    Arc::clone(maps.entry(shape.name).or_insert_with(|| Arc::new(built)))
}
