//! Declaration collection.
//!
//! [`DeclarationCollector`] walks the static descriptor of a persistent type
//! and builds a [`TableMapping`] tree: the main table, the tables it
//! references and the dependent tables holding its collections. The
//! mapping owns the converters for every table, and projects into the
//! declaration trees used to create, insert into and select from those
//! tables.
//!
//! Field rules:
//!
//! - a scalar field is one column;
//! - an `embed` composite is flattened into the owning table, its columns
//!   optionally prefixed with `<field>_`. An optional embed needs a
//!   non-nullable column, since absence is stored as all columns NULL;
//! - a `references` composite is one foreign key column, typed after the
//!   referenced table's single key, placed at the field's position; the
//!   referenced type gets its own table;
//! - a collection occupies no column; its elements go to the dependent table
//!   `<parent>_<field>`, keyed by the parent's key columns and
//!   `_<field>_index`. Collections cannot be optional;
//! - any other composite is a conformity error.

use std::ptr;

use oxide_persist_core::{
    BooleanExpr, ColumnDeclaration, ColumnRef, CreateTable, Expr, NumberExpr, OrderBy,
    OrderDirection, ParameterList, PersistError, Reference, Select, SemanticType, SimpleSelect,
    SqlValue, StringExpr, Table, TableConstraint, TableName,
};
use tracing::{debug, trace};

use crate::convert::{
    CollectionConverter, ObjectConverter, ObjectField, PrimitiveConverter, ReferenceConverter,
    ValueConverter,
};
use crate::descriptor::{DefaultValue, ElementKind, FieldDescriptor, FieldKind, TypeDescriptor};
use crate::error::{OrmError, Result};
use crate::value::Value;

/// A per-table declaration tree.
///
/// Each node holds one table's entries in column order, the trees of the
/// tables it references and the trees of its dependent tables, both in field
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationTree<T> {
    /// Table the entries belong to.
    pub table: TableName,
    /// One entry per column.
    pub entries: Vec<T>,
    /// Table-level constraints.
    pub constraints: Vec<TableConstraint>,
    /// Trees of referenced tables.
    pub referenced: Vec<DeclarationTree<T>>,
    /// Trees of dependent tables.
    pub dependent: Vec<DeclarationTree<T>>,
}

/// Column declarations, for CREATE TABLE.
pub type ColumnDeclarations = DeclarationTree<ColumnDeclaration>;

/// Column names, for INSERT.
pub type InsertDeclaration = DeclarationTree<String>;

/// Qualified column names, for SELECT.
pub type SelectDeclaration = DeclarationTree<ColumnRef>;

impl<T> DeclarationTree<T> {
    fn project(mapping: &TableMapping, entries: &dyn Fn(&TableMapping) -> Vec<T>) -> Self {
        Self {
            table: mapping.table.name().clone(),
            entries: entries(mapping),
            constraints: mapping.constraints.clone(),
            referenced: mapping
                .referenced
                .iter()
                .map(|link| Self::project(&link.mapping, entries))
                .collect(),
            dependent: mapping
                .dependent
                .iter()
                .map(|link| Self::project(&link.mapping, entries))
                .collect(),
        }
    }

    /// Visits every node depth first: referenced trees, then the node, then
    /// dependent trees.
    pub fn visit<'a, F: FnMut(&'a Self)>(&'a self, f: &mut F) {
        for tree in &self.referenced {
            tree.visit(f);
        }
        f(self);
        for tree in &self.dependent {
            tree.visit(f);
        }
    }

    /// Returns the table names in visiting order, repeats included.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.visit(&mut |tree| names.push(tree.table.to_string()));
        names
    }
}

impl ColumnDeclarations {
    /// Returns one CREATE TABLE per distinct table, referenced tables before
    /// the tables referencing them and parents before their dependents.
    #[must_use]
    pub fn create_statements(&self) -> Vec<CreateTable> {
        let mut statements: Vec<CreateTable> = Vec::new();
        self.visit(&mut |tree| {
            if statements.iter().all(|s| s.name != tree.table) {
                statements.push(CreateTable {
                    name: tree.table.clone(),
                    columns: tree.entries.clone(),
                    constraints: tree.constraints.clone(),
                });
            }
        });
        statements
    }
}

impl SelectDeclaration {
    /// Returns the SELECT of this node's columns.
    #[must_use]
    pub fn select(&self) -> SimpleSelect {
        SimpleSelect::new(self.table.clone()).columns(self.entries.clone())
    }
}

/// Whether a table stores objects or collection elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// Rows are objects.
    Object,
    /// Rows are `[key.., index, element]` records of a dependent table.
    Collection,
}

/// A table reached from a field.
#[derive(Debug)]
pub struct Link {
    /// Field index path from the owning row's value to the field.
    pub path: Vec<usize>,
    /// Mapping of the linked table.
    pub mapping: TableMapping,
}

/// The mapping of one table and, recursively, its linked tables.
#[derive(Debug)]
pub struct TableMapping {
    table: Table,
    kind: MappingKind,
    converter: Box<dyn ValueConverter>,
    constraints: Vec<TableConstraint>,
    referenced: Vec<Link>,
    dependent: Vec<Link>,
}

impl TableMapping {
    /// Returns the logical table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Returns what the rows of this table hold.
    #[must_use]
    pub const fn kind(&self) -> MappingKind {
        self.kind
    }

    /// Returns the row converter.
    #[must_use]
    pub fn converter(&self) -> &dyn ValueConverter {
        &*self.converter
    }

    /// Returns the table-level constraints.
    #[must_use]
    pub fn constraints(&self) -> &[TableConstraint] {
        &self.constraints
    }

    /// Returns the referenced tables, in field order.
    #[must_use]
    pub fn referenced(&self) -> &[Link] {
        &self.referenced
    }

    /// Returns the dependent tables, in field order.
    #[must_use]
    pub fn dependent(&self) -> &[Link] {
        &self.dependent
    }

    /// Returns the column declarations.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnDeclaration> {
        let mut columns = Vec::new();
        self.converter.put_column_declarations(&mut columns);
        columns
    }

    /// Returns the column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.converter.put_column_names(&mut names);
        names
    }

    /// Projects the column declarations of every table.
    #[must_use]
    pub fn column_declarations(&self) -> ColumnDeclarations {
        DeclarationTree::project(self, &Self::columns)
    }

    /// Projects the INSERT column lists of every table.
    #[must_use]
    pub fn insert_declaration(&self) -> InsertDeclaration {
        DeclarationTree::project(self, &Self::column_names)
    }

    /// Returns the column names qualified with the table name.
    #[must_use]
    pub fn qualified_columns(&self) -> Vec<ColumnRef> {
        let table = &self.table.name().name;
        self.column_names()
            .into_iter()
            .map(|column| ColumnRef::qualified(table.clone(), column))
            .collect()
    }

    /// Projects the qualified SELECT column lists of every table.
    #[must_use]
    pub fn select_declaration(&self) -> SelectDeclaration {
        DeclarationTree::project(self, &Self::qualified_columns)
    }

    /// Returns the value the links of a row are relative to: the object
    /// itself, or the element of a collection row.
    #[must_use]
    pub fn row_value<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        match self.kind {
            MappingKind::Object => Some(row),
            MappingKind::Collection => CollectionConverter::element_of(row),
        }
    }

    /// Mutable variant of [`row_value`](Self::row_value).
    pub fn row_value_mut<'a>(&self, row: &'a mut Value) -> Option<&'a mut Value> {
        match self.kind {
            MappingKind::Object => Some(row),
            MappingKind::Collection => CollectionConverter::element_of_mut(row),
        }
    }

    /// Returns the primary key values of a row.
    pub fn key_values(&self, row: &Value) -> Result<Vec<SqlValue>> {
        let keys = self.table.primary_keys();
        if keys.is_empty() {
            return Err(self.missing_key());
        }
        let mut params = ParameterList::new();
        self.converter.collect_values(row, &mut params)?;
        let values = params.into_values();
        keys.iter()
            .map(|key| values.get(key.position).cloned().ok_or_else(|| self.missing_key()))
            .collect()
    }

    /// Builds the SELECT loading the rows that belong to `key`.
    ///
    /// For an object table `key` is its primary key. For a dependent table
    /// it is the parent's key, and rows are ordered by their index column.
    pub fn lookup(&self, key: &[SqlValue]) -> Result<Select> {
        let keys = self.table.primary_keys();
        let (matched, index) = match self.kind {
            MappingKind::Object => (keys, None),
            MappingKind::Collection => match keys.split_last() {
                Some((index, parent)) => (parent, Some(index)),
                None => return Err(self.missing_key()),
            },
        };
        if matched.is_empty() || matched.len() != key.len() {
            return Err(self.missing_key());
        }
        let mut condition: Option<BooleanExpr> = None;
        for (column, value) in matched.iter().zip(key) {
            let test = column_expr(&column.column, column.ty)?.eq(Expr::parameter(value.clone())?);
            condition = Some(match condition {
                Some(previous) => previous.and(test),
                None => test,
            });
        }
        let mut select =
            SimpleSelect::new(self.table.name().clone()).columns(self.qualified_columns());
        select.where_clause = condition;
        let select = Select::from(select);
        Ok(match index {
            Some(index) => select.order_by(
                vec![OrderBy {
                    expr: Expr::Number(NumberExpr::column(index.column.clone())),
                    direction: OrderDirection::Asc,
                }],
                None,
            ),
            None => select,
        })
    }

    fn missing_key(&self) -> OrmError {
        OrmError::MissingPrimaryKey {
            table: self.table.name().to_string(),
        }
    }
}

fn column_expr(name: &str, ty: SemanticType) -> Result<Expr> {
    Ok(match ty {
        SemanticType::Boolean => Expr::Boolean(BooleanExpr::column(name)),
        SemanticType::Char
        | SemanticType::String64
        | SemanticType::String128
        | SemanticType::String => Expr::String(StringExpr::column(name)),
        ty if ty.is_numeric() => Expr::Number(NumberExpr::column(name)),
        ty => {
            return Err(PersistError::Unsupported(format!(
                "cannot look up rows by a {ty} key"
            ))
            .into());
        }
    })
}

/// Walks field descriptors into table mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationCollector {
    prefix_embedded: bool,
}

#[derive(Default)]
struct Frame {
    foreign_keys: Vec<(String, Table)>,
    referenced: Vec<Link>,
    collections: Vec<PendingCollection>,
}

struct PendingCollection {
    owner: &'static str,
    field: &'static FieldDescriptor,
    path: Vec<usize>,
    prefix: String,
    element: ElementKind,
}

impl DeclarationCollector {
    /// Creates a collector that does not prefix embedded columns.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix_embedded: false,
        }
    }

    /// Prefixes the columns of embedded fields with `<field>_`.
    #[must_use]
    pub const fn prefix_embedded(mut self, enabled: bool) -> Self {
        self.prefix_embedded = enabled;
        self
    }

    /// Collects the mapping of a persistent type.
    pub fn collect(&self, descriptor: &'static TypeDescriptor) -> Result<TableMapping> {
        let mut stack = vec![descriptor];
        let mapping = self.collect_object(descriptor, &mut stack)?;
        debug!(
            type_name = descriptor.name,
            table = %mapping.table.name(),
            referenced = mapping.referenced.len(),
            dependent = mapping.dependent.len(),
            "Collected declarations"
        );
        Ok(mapping)
    }

    fn collect_object(
        &self,
        descriptor: &'static TypeDescriptor,
        stack: &mut Vec<&'static TypeDescriptor>,
    ) -> Result<TableMapping> {
        let mut frame = Frame::default();
        let converter = self.collect_fields(descriptor, &[], "", true, stack, &mut frame)?;
        let mut columns = Vec::new();
        converter.put_column_declarations(&mut columns);
        let table = build_table(TableName::new(descriptor.table), &columns, frame.foreign_keys);
        let dependent = self.collect_dependents(&table, frame.collections, stack)?;
        Ok(TableMapping {
            table,
            kind: MappingKind::Object,
            converter: Box::new(converter),
            constraints: Vec::new(),
            referenced: frame.referenced,
            dependent,
        })
    }

    fn collect_fields(
        &self,
        descriptor: &'static TypeDescriptor,
        path: &[usize],
        prefix: &str,
        top_level: bool,
        stack: &mut Vec<&'static TypeDescriptor>,
        frame: &mut Frame,
    ) -> Result<ObjectConverter> {
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        for (index, field) in descriptor.fields.iter().enumerate() {
            let mut field_path = path.to_vec();
            field_path.push(index);
            match field.kind {
                FieldKind::Scalar(ty) => {
                    let column = scalar_column(field, ty, prefix, top_level);
                    trace!(
                        type_name = descriptor.name,
                        field = field.name,
                        column = %column.name,
                        "Scalar field"
                    );
                    fields.push(ObjectField::stored(
                        field.name,
                        field.nullable,
                        PrimitiveConverter::new(column),
                    ));
                }
                FieldKind::Composite(target) if field.annotations.references => {
                    let (converter, mapping) = self.reference(field, target(), prefix, stack)?;
                    trace!(
                        type_name = descriptor.name,
                        field = field.name,
                        table = %mapping.table.name(),
                        "Referenced field"
                    );
                    frame
                        .foreign_keys
                        .push((converter.label(), mapping.table.clone()));
                    frame.referenced.push(Link {
                        path: field_path,
                        mapping,
                    });
                    fields.push(ObjectField::stored(field.name, field.nullable, converter));
                }
                FieldKind::Composite(target) if field.annotations.embed => {
                    let target = target();
                    if field.nullable && !always_present(target) {
                        return Err(OrmError::AmbiguousOptionalEmbed {
                            field: field.name,
                            type_name: descriptor.name,
                        });
                    }
                    enter(stack, field, target)?;
                    let inner_prefix = self.embedded_prefix(prefix, field);
                    let inner =
                        self.collect_fields(target, &field_path, &inner_prefix, false, stack, frame)?;
                    stack.pop();
                    trace!(
                        type_name = descriptor.name,
                        field = field.name,
                        "Embedded field"
                    );
                    fields.push(ObjectField::stored(
                        field.name,
                        field.nullable,
                        inner.optional(field.nullable),
                    ));
                }
                FieldKind::Composite(_) => {
                    return Err(OrmError::Conformity {
                        field: field.name,
                        type_name: descriptor.name,
                    });
                }
                FieldKind::Collection(ElementKind::Collection) => {
                    return Err(OrmError::NestedCollection {
                        field: field.name,
                        type_name: descriptor.name,
                    });
                }
                FieldKind::Collection(_) if field.nullable => {
                    return Err(OrmError::OptionalCollection {
                        field: field.name,
                        type_name: descriptor.name,
                    });
                }
                FieldKind::Collection(element) => {
                    trace!(
                        type_name = descriptor.name,
                        field = field.name,
                        "Collection field"
                    );
                    frame.collections.push(PendingCollection {
                        owner: descriptor.name,
                        field,
                        path: field_path,
                        prefix: String::from(prefix),
                        element,
                    });
                    fields.push(ObjectField::dependent(field.name));
                }
            }
        }
        Ok(ObjectConverter::new(descriptor.name, fields))
    }

    fn embedded_prefix(&self, prefix: &str, field: &FieldDescriptor) -> String {
        if self.prefix_embedded {
            format!("{prefix}{}_", field.column)
        } else {
            String::from(prefix)
        }
    }

    fn reference(
        &self,
        field: &'static FieldDescriptor,
        target: &'static TypeDescriptor,
        prefix: &str,
        stack: &mut Vec<&'static TypeDescriptor>,
    ) -> Result<(ReferenceConverter, TableMapping)> {
        enter(stack, field, target)?;
        let mapping = self.collect_object(target, stack)?;
        stack.pop();

        let key = match mapping.table.primary_keys() {
            [] => return Err(mapping.missing_key()),
            [key] => key,
            keys => {
                return Err(PersistError::ReferenceColumnCount {
                    table: mapping.table.name().to_string(),
                    expected: keys.len(),
                    actual: 1,
                }
                .into());
            }
        };
        let declaration = ColumnDeclaration {
            not_null: field.annotations.not_null,
            unique: field.annotations.unique,
            ..ColumnDeclaration::new(format!("{prefix}{}", field.column), key.ty)
        }
        .referencing(&mapping.table)?;
        let key_path = mapping
            .converter
            .value_path(key.position)
            .ok_or_else(|| mapping.missing_key())?;
        Ok((ReferenceConverter::new(declaration, key_path), mapping))
    }

    fn collect_dependents(
        &self,
        parent: &Table,
        pending: Vec<PendingCollection>,
        stack: &mut Vec<&'static TypeDescriptor>,
    ) -> Result<Vec<Link>> {
        pending
            .into_iter()
            .map(|collection| {
                let mapping = self.collect_collection(parent, &collection, stack)?;
                Ok(Link {
                    path: collection.path,
                    mapping,
                })
            })
            .collect()
    }

    fn collect_collection(
        &self,
        parent: &Table,
        collection: &PendingCollection,
        stack: &mut Vec<&'static TypeDescriptor>,
    ) -> Result<TableMapping> {
        let PendingCollection {
            owner,
            field,
            element,
            ..
        } = *collection;
        let parent_name = &parent.name().name;
        let field_name = format!("{}{}", collection.prefix, field.column);
        let name = TableName::new(format!("{parent_name}_{field_name}"));

        let parent_keys = parent.primary_keys();
        if parent_keys.is_empty() {
            return Err(OrmError::MissingPrimaryKey {
                table: parent.name().to_string(),
            });
        }
        let mut keys: Vec<ColumnDeclaration> = parent_keys
            .iter()
            .map(|key| ColumnDeclaration {
                not_null: true,
                ..ColumnDeclaration::new(format!("{parent_name}_{}", key.column), key.ty)
            })
            .collect();
        let mut constraints = Vec::new();
        if let [single] = keys.as_mut_slice() {
            *single = single.clone().referencing(parent)?;
        }
        let index = ColumnDeclaration {
            not_null: true,
            ..ColumnDeclaration::new(format!("_{field_name}_index"), SemanticType::Int32)
        };
        let mut key_names: Vec<String> = keys.iter().map(|k| k.name.clone()).collect();
        let parent_columns = key_names.clone();
        key_names.push(index.name.clone());
        constraints.push(TableConstraint::PrimaryKey(key_names.clone()));
        if parent_columns.len() > 1 {
            constraints.push(TableConstraint::ForeignKey {
                columns: parent_columns.clone(),
                reference: Reference::new(
                    parent.name().clone(),
                    parent_keys.iter().map(|k| k.column.clone()).collect(),
                ),
            });
        }

        let mut frame = Frame {
            foreign_keys: parent_columns
                .iter()
                .map(|column| (column.clone(), parent.clone()))
                .collect(),
            ..Frame::default()
        };
        let element: Box<dyn ValueConverter> = match element {
            ElementKind::Scalar(ty) => Box::new(PrimitiveConverter::new(ColumnDeclaration {
                unique: field.annotations.unique,
                ..ColumnDeclaration::new(field_name.clone(), ty)
            })),
            ElementKind::Composite(target) if field.annotations.references => {
                let (converter, mapping) =
                    self.reference(field, target(), &collection.prefix, stack)?;
                frame
                    .foreign_keys
                    .push((converter.label(), mapping.table.clone()));
                frame.referenced.push(Link {
                    path: Vec::new(),
                    mapping,
                });
                Box::new(converter)
            }
            ElementKind::Composite(target) => {
                let target = target();
                enter(stack, field, target)?;
                let prefix = self.embedded_prefix("", field);
                let inner = self.collect_fields(target, &[], &prefix, false, stack, &mut frame)?;
                stack.pop();
                Box::new(inner)
            }
            ElementKind::Collection => {
                return Err(OrmError::NestedCollection {
                    field: field.name,
                    type_name: owner,
                });
            }
        };
        trace!(table = %name, field = field.name, "Dependent table");

        let converter = CollectionConverter::new(
            name.name.clone(),
            keys.into_iter().map(PrimitiveConverter::new).collect(),
            PrimitiveConverter::new(index),
            element,
        );
        let mut columns = Vec::new();
        converter.put_column_declarations(&mut columns);
        let keyed: Vec<ColumnDeclaration> = columns
            .into_iter()
            .enumerate()
            .map(|(position, column)| ColumnDeclaration {
                primary_key: position < key_names.len(),
                ..column
            })
            .collect();
        let table = build_table(name, &keyed, frame.foreign_keys);
        let dependent = self.collect_dependents(&table, frame.collections, stack)?;
        Ok(TableMapping {
            table,
            kind: MappingKind::Collection,
            converter: Box::new(converter),
            constraints,
            referenced: frame.referenced,
            dependent,
        })
    }
}

fn enter(
    stack: &mut Vec<&'static TypeDescriptor>,
    field: &FieldDescriptor,
    target: &'static TypeDescriptor,
) -> Result<()> {
    // Descriptors are statics, one per type, so the address identifies the type.
    if stack.iter().any(|entered| ptr::eq(*entered, target)) {
        return Err(OrmError::CyclicReference {
            field: field.name,
            type_name: target.name,
        });
    }
    stack.push(target);
    Ok(())
}

/// Whether a stored object of this type always has a non-null column.
fn always_present(descriptor: &'static TypeDescriptor) -> bool {
    fn walk(descriptor: &'static TypeDescriptor, seen: &mut Vec<&'static TypeDescriptor>) -> bool {
        if seen.iter().any(|entered| ptr::eq(*entered, descriptor)) {
            return false;
        }
        seen.push(descriptor);
        descriptor.fields.iter().any(|field| {
            !field.nullable
                && match field.kind {
                    FieldKind::Scalar(_) => true,
                    FieldKind::Composite(target) => {
                        field.annotations.references
                            || (field.annotations.embed && walk(target(), seen))
                    }
                    FieldKind::Collection(_) => false,
                }
        })
    }
    walk(descriptor, &mut Vec::new())
}

fn scalar_column(
    field: &FieldDescriptor,
    ty: SemanticType,
    prefix: &str,
    top_level: bool,
) -> ColumnDeclaration {
    let annotations = field.annotations;
    ColumnDeclaration {
        not_null: annotations.not_null,
        primary_key: top_level && annotations.primary_key,
        auto_increment: top_level && annotations.auto_increment,
        unique: annotations.unique,
        default: annotations.default.map(DefaultValue::to_expr),
        ..ColumnDeclaration::new(format!("{prefix}{}", field.column), ty)
    }
}

fn build_table(
    name: TableName,
    columns: &[ColumnDeclaration],
    foreign_keys: Vec<(String, Table)>,
) -> Table {
    foreign_keys
        .into_iter()
        .fold(Table::new(name, columns), |table, (column, target)| {
            table.with_foreign_key(column, target)
        })
}

#[cfg(test)]
mod tests {
    use oxide_persist_core::{GenericDialect, RowCursor, SelectionResult, Unit, compile};

    use super::*;
    use crate::descriptor::Annotations;

    static POINT_FIELDS: [FieldDescriptor; 2] = [
        FieldDescriptor {
            name: "x",
            column: "x",
            kind: FieldKind::Scalar(SemanticType::Int32),
            nullable: false,
            annotations: Annotations::NONE,
        },
        FieldDescriptor {
            name: "y",
            column: "y",
            kind: FieldKind::Scalar(SemanticType::Int32),
            nullable: false,
            annotations: Annotations::NONE,
        },
    ];

    static POINT: TypeDescriptor = TypeDescriptor {
        name: "Point",
        table: "Point",
        fields: &POINT_FIELDS,
    };

    fn point() -> &'static TypeDescriptor {
        &POINT
    }

    static SHAPE_FIELDS: [FieldDescriptor; 3] = [
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
            name: "origin",
            column: "origin",
            kind: FieldKind::Composite(point),
            nullable: true,
            annotations: Annotations {
                embed: true,
                ..Annotations::NONE
            },
        },
        FieldDescriptor {
            name: "labels",
            column: "labels",
            kind: FieldKind::Collection(ElementKind::Scalar(SemanticType::String64)),
            nullable: false,
            annotations: Annotations::NONE,
        },
    ];

    static SHAPE: TypeDescriptor = TypeDescriptor {
        name: "Shape",
        table: "Shapes",
        fields: &SHAPE_FIELDS,
    };

    static BAG_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor {
        name: "items",
        column: "items",
        kind: FieldKind::Collection(ElementKind::Scalar(SemanticType::Int32)),
        nullable: false,
        annotations: Annotations::NONE,
    }];

    static BAG: TypeDescriptor = TypeDescriptor {
        name: "Bag",
        table: "Bags",
        fields: &BAG_FIELDS,
    };

    fn render(select: &Select) -> (String, Vec<SqlValue>) {
        compile(select, &GenericDialect::new(), &Unit::new()).unwrap()
    }

    #[test]
    fn test_embedded_columns_are_flattened() {
        let mapping = DeclarationCollector::new().collect(&SHAPE).unwrap();
        assert_eq!(mapping.column_names(), vec!["id", "x", "y"]);

        let prefixed = DeclarationCollector::new()
            .prefix_embedded(true)
            .collect(&SHAPE)
            .unwrap();
        assert_eq!(prefixed.column_names(), vec!["id", "origin_x", "origin_y"]);
        assert_eq!(
            prefixed.dependent()[0].mapping.column_names(),
            vec!["Shapes_id", "_labels_index", "labels"]
        );
    }

    #[test]
    fn test_object_lookup_matches_primary_key() {
        let mapping = DeclarationCollector::new().collect(&SHAPE).unwrap();
        let (sql, params) = render(&mapping.lookup(&[SqlValue::Int32(5)]).unwrap());
        assert_eq!(sql, "SELECT Shapes.id, Shapes.x, Shapes.y FROM Shapes WHERE id = ?");
        assert_eq!(params, vec![SqlValue::Int32(5)]);
    }

    #[test]
    fn test_collection_lookup_orders_by_index() {
        let mapping = DeclarationCollector::new().collect(&SHAPE).unwrap();
        let labels = &mapping.dependent()[0].mapping;
        assert_eq!(labels.kind(), MappingKind::Collection);
        assert_eq!(
            labels.constraints(),
            &[TableConstraint::PrimaryKey(vec![
                String::from("Shapes_id"),
                String::from("_labels_index")
            ])]
        );

        let (sql, params) = render(&labels.lookup(&[SqlValue::Int32(5)]).unwrap());
        assert_eq!(
            sql,
            "SELECT Shapes_labels.Shapes_id, Shapes_labels._labels_index, Shapes_labels.labels \
             FROM Shapes_labels WHERE Shapes_id = ? ORDER BY _labels_index ASC"
        );
        assert_eq!(params, vec![SqlValue::Int32(5)]);
        assert!(matches!(
            labels.lookup(&[]),
            Err(OrmError::MissingPrimaryKey { .. })
        ));
    }

    #[test]
    fn test_absent_embedded_object_recovers_as_null() {
        let mapping = DeclarationCollector::new().collect(&SHAPE).unwrap();
        let mut cursor = RowCursor::new(vec![vec![
            SqlValue::Int32(1),
            SqlValue::Null,
            SqlValue::Null,
        ]]);
        assert!(cursor.move_to_first_row().unwrap());
        let row = mapping.converter().recover(&mut cursor).unwrap();
        assert_eq!(
            row,
            Value::Record(vec![
                Value::Scalar(SqlValue::Int32(1)),
                Value::Null,
                Value::List(Vec::new()),
            ])
        );
        assert_eq!(mapping.key_values(&row).unwrap(), vec![SqlValue::Int32(1)]);
    }

    #[test]
    fn test_collection_needs_parent_key() {
        let err = DeclarationCollector::new().collect(&BAG).unwrap_err();
        assert!(matches!(err, OrmError::MissingPrimaryKey { ref table } if table == "Bags"));
    }

    #[test]
    fn test_create_statements_are_distinct() {
        let mapping = DeclarationCollector::new().collect(&SHAPE).unwrap();
        let tree = mapping.column_declarations();
        assert_eq!(tree.table_names(), vec!["Shapes", "Shapes_labels"]);
        let names: Vec<_> = tree
            .create_statements()
            .into_iter()
            .map(|create| create.name.name)
            .collect();
        assert_eq!(names, vec!["Shapes", "Shapes_labels"]);
    }
}
