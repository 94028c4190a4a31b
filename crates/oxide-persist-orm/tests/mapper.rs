//! End-to-end mapper tests over an in-memory driver.

mod common;

use common::{Customer, MemoryDriver, User, customer, france, mapper, mapper_with, text};
use oxide_persist_core::{PersistError, SqlValue};
use oxide_persist_orm::{Driver, MapperOptions, OrmError};

fn ada() -> User {
    User {
        id: 1,
        name: String::from("Ada"),
        age: Some(36),
    }
}

#[test]
fn test_create_tables_for_flat_type() {
    let mut mapper = mapper();
    mapper.create_tables::<User>().unwrap();
    assert_eq!(
        mapper.driver().log,
        vec![
            "BEGIN",
            "CREATE TABLE IF NOT EXISTS Users(id INT PRIMARY KEY, name VARCHAR(64), age INT)",
            "COMMIT",
        ]
    );
}

#[test]
fn test_insert_binds_one_value_per_column() {
    let mut mapper = mapper();
    mapper.create_tables::<User>().unwrap();
    mapper.insert(&ada()).unwrap();

    let driver = mapper.driver();
    assert_eq!(
        driver.statements("INSERT"),
        vec!["INSERT INTO Users(id, name, age) VALUES(?, ?, ?)"]
    );
    assert_eq!(
        driver.rows("Users"),
        &[vec![SqlValue::Int32(1), text("Ada"), SqlValue::Int32(36)]]
    );
}

#[test]
fn test_absent_optional_is_stored_as_null() {
    let mut mapper = mapper();
    mapper.create_tables::<User>().unwrap();
    let user = User { age: None, ..ada() };
    mapper.insert(&user).unwrap();
    assert_eq!(mapper.driver().rows("Users")[0][2], SqlValue::Null);

    let loaded: Vec<User> = mapper.select_all().unwrap();
    assert_eq!(loaded, vec![user]);
}

#[test]
fn test_select_all_reads_qualified_columns() {
    let mut mapper = mapper();
    mapper.create_tables::<User>().unwrap();
    mapper.insert(&ada()).unwrap();
    let loaded: Vec<User> = mapper.select_all().unwrap();
    assert_eq!(loaded, vec![ada()]);
    assert_eq!(
        mapper.driver().statements("SELECT"),
        vec!["SELECT Users.id, Users.name, Users.age FROM Users"]
    );
}

#[test]
fn test_create_tables_orders_dependencies() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    assert_eq!(
        mapper.driver().statements("CREATE"),
        vec![
            "CREATE TABLE IF NOT EXISTS Countries(code VARCHAR(64) PRIMARY KEY, name VARCHAR(64))",
            "CREATE TABLE IF NOT EXISTS Customers(id BIGINT PRIMARY KEY, street VARCHAR(128), \
             city VARCHAR(64), country VARCHAR(64) REFERENCES Countries (code), \
             shipping VARCHAR(64) REFERENCES Countries (code))",
            "CREATE TABLE IF NOT EXISTS Customers_tags(Customers_id BIGINT NOT NULL \
             REFERENCES Customers (id), _tags_index INT NOT NULL, tags VARCHAR(64), \
             PRIMARY KEY(Customers_id, _tags_index))",
            "CREATE TABLE IF NOT EXISTS Customers_lines(Customers_id BIGINT NOT NULL \
             REFERENCES Customers (id), _lines_index INT NOT NULL, sku VARCHAR(64), \
             quantity INT, PRIMARY KEY(Customers_id, _lines_index))",
        ]
    );
}

#[test]
fn test_insert_follows_dependency_order() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    mapper.insert(&customer()).unwrap();

    let driver = mapper.driver();
    assert_eq!(
        driver.statements("INSERT"),
        vec![
            "INSERT INTO Countries(code, name) VALUES(?, ?)",
            "INSERT INTO Customers(id, street, city, country, shipping) VALUES(?, ?, ?, ?, ?)",
            "INSERT INTO Customers_tags(Customers_id, _tags_index, tags) VALUES(?, ?, ?)",
            "INSERT INTO Customers_tags(Customers_id, _tags_index, tags) VALUES(?, ?, ?)",
            "INSERT INTO Customers_lines(Customers_id, _lines_index, sku, quantity) \
             VALUES(?, ?, ?, ?)",
            "INSERT INTO Customers_lines(Customers_id, _lines_index, sku, quantity) \
             VALUES(?, ?, ?, ?)",
        ]
    );
    assert_eq!(
        driver.rows("Customers"),
        &[vec![
            SqlValue::Int64(7),
            text("1 rue de la Paix"),
            text("Paris"),
            text("FR"),
            text("FR"),
        ]]
    );
    assert_eq!(
        driver.rows("Customers_tags"),
        &[
            vec![SqlValue::Int64(7), SqlValue::Int32(0), text("vip")],
            vec![SqlValue::Int64(7), SqlValue::Int32(1), text("early")],
        ]
    );
    assert_eq!(driver.log.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(driver.log.last().map(String::as_str), Some("COMMIT"));
}

#[test]
fn test_round_trip_with_references_and_collections() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    let stored = customer();
    mapper.insert(&stored).unwrap();

    let loaded: Vec<Customer> = mapper.select_all().unwrap();
    assert_eq!(loaded, vec![stored]);

    let selects = mapper.driver().statements("SELECT");
    assert!(selects.contains(
        &"SELECT Countries.code, Countries.name FROM Countries WHERE code = ?"
    ));
    assert!(selects.contains(
        &"SELECT Customers_tags.Customers_id, Customers_tags._tags_index, Customers_tags.tags \
          FROM Customers_tags WHERE Customers_id = ? ORDER BY _tags_index ASC"
    ));
}

#[test]
fn test_collection_order_survives_storage_order() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    mapper.insert(&customer()).unwrap();
    mapper
        .driver_mut()
        .tables
        .get_mut("Customers_tags")
        .unwrap()
        .rows
        .reverse();

    let loaded: Vec<Customer> = mapper.select_all().unwrap();
    assert_eq!(loaded[0].tags, vec!["vip", "early"]);
}

#[test]
fn test_absent_reference_and_empty_collections() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    let stored = Customer {
        shipping: None,
        tags: Vec::new(),
        lines: Vec::new(),
        ..customer()
    };
    mapper.insert(&stored).unwrap();

    let driver = mapper.driver();
    assert_eq!(driver.statements("INSERT").len(), 2);
    assert_eq!(driver.rows("Customers")[0][4], SqlValue::Null);

    let loaded: Vec<Customer> = mapper.select_all().unwrap();
    assert_eq!(loaded, vec![stored]);
}

#[test]
fn test_prefixed_embedded_columns() {
    let options = MapperOptions {
        prefix_embedded: true,
        ..MapperOptions::default()
    };
    let mut mapper = mapper_with(MemoryDriver::new(), options);
    let mapping = mapper.mapping::<Customer>().unwrap();
    assert_eq!(
        mapping.column_names(),
        vec!["id", "address_street", "address_city", "country", "shipping"]
    );

    mapper.create_tables::<Customer>().unwrap();
    mapper.insert(&customer()).unwrap();
    let loaded: Vec<Customer> = mapper.select_all().unwrap();
    assert_eq!(loaded, vec![customer()]);
}

#[test]
fn test_failed_insert_rolls_back() {
    let mut mapper = mapper_with(
        MemoryDriver::failing_on("INSERT INTO Customers_lines"),
        MapperOptions::default(),
    );
    mapper.create_tables::<Customer>().unwrap();
    let err = mapper.insert(&customer()).unwrap_err();
    assert!(matches!(err, OrmError::Persist(PersistError::Driver(_))));

    let driver = mapper.driver();
    assert_eq!(driver.log.last().map(String::as_str), Some("ROLLBACK"));
    assert!(driver.rows("Countries").is_empty());
    assert!(driver.rows("Customers").is_empty());
    assert!(driver.rows("Customers_tags").is_empty());
}

#[test]
fn test_stored_null_in_required_column_is_corrupt() {
    let mut mapper = mapper();
    mapper.create_tables::<User>().unwrap();
    mapper
        .driver_mut()
        .execute(
            "INSERT INTO Users(id, name, age) VALUES(?, ?, ?)",
            &[SqlValue::Int32(2), SqlValue::Null, SqlValue::Null],
        )
        .unwrap();

    let err = mapper.select_all::<User>().unwrap_err();
    assert!(matches!(
        err,
        OrmError::Persist(PersistError::CorruptNullValue { ref column }) if column == "name"
    ));
}

#[test]
fn test_dangling_reference_is_not_found() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    mapper
        .driver_mut()
        .execute(
            "INSERT INTO Customers(id, street, city, country, shipping) VALUES(?, ?, ?, ?, ?)",
            &[
                SqlValue::Int64(9),
                text("Main St"),
                text("Oslo"),
                text("NO"),
                SqlValue::Null,
            ],
        )
        .unwrap();

    let err = mapper.select_all::<Customer>().unwrap_err();
    assert!(matches!(err, OrmError::NotFound { ref table } if table == "Countries"));
}

#[test]
fn test_shared_reference_inserted_once_per_call() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    let stored = Customer {
        shipping: Some(france()),
        ..customer()
    };
    mapper.insert(&stored).unwrap();
    assert_eq!(mapper.driver().rows("Countries").len(), 1);
}

#[test]
fn test_stored_reference_is_not_inserted_again() {
    let mut mapper = mapper();
    mapper.create_tables::<Customer>().unwrap();
    mapper.insert(&customer()).unwrap();
    let second = Customer {
        id: 8,
        ..customer()
    };
    mapper.insert(&second).unwrap();

    let driver = mapper.driver();
    assert_eq!(driver.rows("Countries").len(), 1);
    assert_eq!(driver.rows("Customers").len(), 2);
    assert_eq!(
        driver
            .statements("INSERT INTO Countries")
            .len(),
        1
    );

    let loaded: Vec<Customer> = mapper.select_all().unwrap();
    assert_eq!(loaded, vec![customer(), second]);
}
