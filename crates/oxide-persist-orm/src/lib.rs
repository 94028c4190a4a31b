//! # oxide-persist-orm
//!
//! Maps Rust structs to relational tables on top of `oxide-persist-core`.
//!
//! This crate provides:
//! - Static [`TypeDescriptor`]s describing persistent types, generated by
//!   `#[derive(Persistent)]`
//! - A [`DeclarationCollector`] turning a descriptor into a [`TableMapping`]:
//!   the main table, referenced tables and dependent collection tables
//! - [`OrderedInsertStatements`], which compiles one INSERT template per
//!   distinct table and replays them in dependency order
//! - [`ValueConverter`]s binding values into statements and reading them
//!   back from result rows
//! - A [`Mapper`] running the whole thing through an injected [`Driver`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use oxide_persist_orm::{DialectKind, Mapper, MapperOptions, Persistent};
//!
//! #[derive(Debug, Persistent)]
//! #[persistent(table = "Users")]
//! struct User {
//!     #[persist(primary_key)]
//!     id: i32,
//!     #[persist(max_length = 64)]
//!     name: String,
//!     age: Option<i32>,
//!     #[persist(max_length = 64)]
//!     tags: Vec<String>,
//! }
//!
//! let mut mapper = Mapper::from_kind(driver, DialectKind::Sqlite, MapperOptions::default());
//! mapper.create_tables::<User>()?;
//! mapper.insert(&user)?;
//! let users: Vec<User> = mapper.select_all()?;
//! ```
//!
//! ## Field annotations
//!
//! | Annotation        | Effect                                              |
//! |-------------------|-----------------------------------------------------|
//! | `primary_key`     | Column is part of the primary key                   |
//! | `auto_increment`  | Column is filled by the database                    |
//! | `unique`          | Column is UNIQUE                                    |
//! | `not_null`        | Column is NOT NULL                                  |
//! | `embed`           | Composite is flattened into the owning table        |
//! | `references`      | Composite is stored in its own table, linked by key |
//! | `default = lit`   | Column DEFAULT                                      |
//! | `max_length = n`  | `String` narrowed to `VARCHAR(64)` or `VARCHAR(128)`|
//! | `binary = n`      | `Blob` narrowed to 16 or 32 bytes                   |
//!
//! Collections (`Vec<T>`) always go to a dependent table named
//! `<table>_<field>`.

pub mod config;
pub mod convert;
pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod mapper;
pub mod plan;
pub mod sequencer;
pub mod value;

pub use config::{DialectKind, MapperOptions};
pub use convert::{
    CollectionConverter, ObjectConverter, ObjectField, PrimitiveConverter, ReferenceConverter,
    SingleRowConverter, ValueConverter,
};
pub use declaration::{
    ColumnDeclarations, DeclarationCollector, DeclarationTree, InsertDeclaration, Link,
    MappingKind, SelectDeclaration, TableMapping,
};
pub use descriptor::{
    Annotations, DefaultValue, ElementKind, FieldDescriptor, FieldKind, PersistValue, Persistent,
    TypeDescriptor,
};
pub use error::{OrmError, Result};
pub use mapper::{Driver, Mapper};
pub use oxide_persist_core::SemanticType;
pub use oxide_persist_derive::Persistent;
pub use plan::{InsertStep, insert_steps};
pub use sequencer::OrderedInsertStatements;
pub use value::Value;
