//! Row planning for ordered inserts.
//!
//! Walks a [`TableMapping`] in the same depth-first order as
//! [`OrderedInsertStatements`](crate::OrderedInsertStatements) and gathers,
//! for every step, the runtime rows to insert with that step's template.

use std::collections::HashMap;

use crate::convert::CollectionConverter;
use crate::declaration::{MappingKind, TableMapping};
use crate::error::Result;
use crate::value::Value;

/// The rows of one walk step.
#[derive(Debug)]
pub struct InsertStep<'a> {
    /// Mapping of the table the rows go to.
    pub mapping: &'a TableMapping,
    /// Rows, in insertion order.
    pub rows: Vec<Value>,
}

/// Plans the rows needed to store `object` and everything it links to.
///
/// An object row already planned for the same table, such as a record
/// referenced from two fields, is planned once.
pub fn insert_steps(mapping: &TableMapping, object: Value) -> Result<Vec<InsertStep<'_>>> {
    let mut planner = Planner::default();
    planner.walk(mapping, vec![object])?;
    Ok(planner.steps)
}

#[derive(Default)]
struct Planner<'a> {
    steps: Vec<InsertStep<'a>>,
    seen: HashMap<String, Vec<Value>>,
}

impl<'a> Planner<'a> {
    fn walk(&mut self, mapping: &'a TableMapping, mut rows: Vec<Value>) -> Result<()> {
        if mapping.kind() == MappingKind::Object {
            let seen = self
                .seen
                .entry(mapping.table().name().to_string())
                .or_default();
            rows.retain(|row| {
                if seen.contains(row) {
                    false
                } else {
                    seen.push(row.clone());
                    true
                }
            });
        }

        for link in mapping.referenced() {
            let targets = rows
                .iter()
                .filter_map(|row| mapping.row_value(row)?.at(&link.path))
                .filter(|target| matches!(target, Value::Record(_)))
                .cloned()
                .collect();
            self.walk(&link.mapping, targets)?;
        }

        let mut children = Vec::with_capacity(mapping.dependent().len());
        for link in mapping.dependent() {
            let mut elements = Vec::new();
            for row in &rows {
                let Some(Value::List(items)) =
                    mapping.row_value(row).and_then(|value| value.at(&link.path))
                else {
                    continue;
                };
                let key = mapping.key_values(row)?;
                for (index, item) in items.iter().enumerate() {
                    elements.push(CollectionConverter::row(&key, index, item.clone())?);
                }
            }
            children.push((link, elements));
        }

        self.steps.push(InsertStep { mapping, rows });
        for (link, elements) in children {
            self.walk(&link.mapping, elements)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use oxide_persist_core::{SemanticType, SqlValue};

    use super::*;
    use crate::declaration::DeclarationCollector;
    use crate::descriptor::{Annotations, ElementKind, FieldDescriptor, FieldKind, TypeDescriptor};

    static CITY_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor {
        name: "name",
        column: "name",
        kind: FieldKind::Scalar(SemanticType::String64),
        nullable: false,
        annotations: Annotations {
            primary_key: true,
            ..Annotations::NONE
        },
    }];

    static CITY: TypeDescriptor = TypeDescriptor {
        name: "City",
        table: "Cities",
        fields: &CITY_FIELDS,
    };

    fn city() -> &'static TypeDescriptor {
        &CITY
    }

    static USER_FIELDS: [FieldDescriptor; 4] = [
        FieldDescriptor {
            name: "id",
            column: "id",
            kind: FieldKind::Scalar(SemanticType::Int32),
            nullable: false,
            annotations: Annotations {
                primary_key: true,
                ..Annotations::NONE
            },
        },
        FieldDescriptor {
            name: "home",
            column: "home",
            kind: FieldKind::Composite(city),
            nullable: false,
            annotations: Annotations {
                references: true,
                ..Annotations::NONE
            },
        },
        FieldDescriptor {
            name: "work",
            column: "work",
            kind: FieldKind::Composite(city),
            nullable: true,
            annotations: Annotations {
                references: true,
                ..Annotations::NONE
            },
        },
        FieldDescriptor {
            name: "tags",
            column: "tags",
            kind: FieldKind::Collection(ElementKind::Scalar(SemanticType::String64)),
            nullable: false,
            annotations: Annotations::NONE,
        },
    ];

    static USER: TypeDescriptor = TypeDescriptor {
        name: "User",
        table: "Users",
        fields: &USER_FIELDS,
    };

    fn text(s: &str) -> Value {
        Value::Scalar(SqlValue::Text(String::from(s)))
    }

    fn user(work: Value, tags: &[&str]) -> Value {
        Value::Record(vec![
            Value::Scalar(SqlValue::Int32(1)),
            Value::Record(vec![text("Lyon")]),
            work,
            Value::List(tags.iter().map(|t| text(t)).collect()),
        ])
    }

    #[test]
    fn test_steps_follow_walk_order() {
        let mapping = DeclarationCollector::new().collect(&USER).unwrap();
        let work = Value::Record(vec![text("Paris")]);
        let steps = insert_steps(&mapping, user(work, &["a", "b"])).unwrap();
        let shape: Vec<_> = steps
            .iter()
            .map(|s| (s.mapping.table().name().name.as_str(), s.rows.len()))
            .collect();
        assert_eq!(
            shape,
            vec![("Cities", 1), ("Cities", 1), ("Users", 1), ("Users_tags", 2)]
        );
        assert_eq!(
            steps[3].rows[1],
            Value::Record(vec![
                Value::Scalar(SqlValue::Int32(1)),
                Value::Scalar(SqlValue::Int32(1)),
                text("b"),
            ])
        );
    }

    #[test]
    fn test_same_record_referenced_twice_is_planned_once() {
        let mapping = DeclarationCollector::new().collect(&USER).unwrap();
        let work = Value::Record(vec![text("Lyon")]);
        let steps = insert_steps(&mapping, user(work, &[])).unwrap();
        assert_eq!(steps[0].rows.len(), 1);
        assert!(steps[1].rows.is_empty());
    }

    #[test]
    fn test_absent_reference_has_no_rows() {
        let mapping = DeclarationCollector::new().collect(&USER).unwrap();
        let steps = insert_steps(&mapping, user(Value::Null, &[])).unwrap();
        assert_eq!(steps.len(), 4);
        assert!(steps[1].rows.is_empty());
        assert!(steps[3].rows.is_empty());
    }
}
