//! Integration tests for CREATE VIEW and CREATE MATERIALIZED VIEW.

mod common;
use common::*;

use oxide_ddl_core::ast::{
    CreateKind, CreatePart, CreateSlot, CreateStatement, Node, QualifiedName, SelectStatement,
    Shape, StorageClause, TableRef,
};

// ===================================================================
// Plain views
// ===================================================================

#[test]
fn view_or_replace() {
    let sql = "CREATE OR REPLACE VIEW v AS SELECT a FROM t WHERE b = 1";
    let create = parse_create(sql);
    assert_eq!(create.shape(), Shape::View);
    assert_eq!(
        create.to_sql(),
        "CREATE OR REPLACE VIEW v AS\nSELECT a FROM t WHERE b = 1"
    );
    assert_eq!(one_line(sql), "CREATE OR REPLACE VIEW v AS SELECT a FROM t WHERE b = 1");
}

#[test]
fn view_with_columns() {
    assert_eq!(
        parse("CREATE VIEW v (a UInt8) AS SELECT 1").to_sql(),
        "CREATE VIEW v\n(\n    a UInt8\n) AS\nSELECT 1"
    );
}

#[test]
fn view_rejects_storage() {
    let _ = parse_err("CREATE VIEW v ENGINE = Memory AS SELECT 1");
}

#[test]
fn view_rejects_storage_part() {
    let mut create = parse_create("CREATE VIEW v AS SELECT 1");
    let err = create
        .attach(CreatePart::Storage(StorageClause::new()))
        .unwrap_err();
    assert_eq!(err.to_string(), "VIEW statements cannot hold a storage clause");
    assert_eq!(create.children().len(), 1);
}

#[test]
fn view_select_with_join() {
    assert_eq!(
        one_line(
            "CREATE VIEW v AS SELECT o.id, c.name AS customer FROM orders AS o \
             INNER JOIN customers AS c ON o.customer_id = c.id ORDER BY o.id DESC LIMIT 10"
        ),
        "CREATE VIEW v AS SELECT o.id, c.name AS customer FROM orders AS o \
         INNER JOIN customers AS c ON o.customer_id = c.id ORDER BY o.id DESC LIMIT 10"
    );
}

// ===================================================================
// Materialized views
// ===================================================================

#[test]
fn materialized_view_to() {
    let create = parse_create("CREATE MATERIALIZED VIEW mv TO target AS SELECT * FROM src");
    assert_eq!(create.shape(), Shape::MaterializedView);
    assert_eq!(
        create.to_sql(),
        "CREATE MATERIALIZED VIEW mv TO target AS\nSELECT * FROM src"
    );
}

#[test]
fn materialized_view_built_by_hand() {
    let kind = CreateKind::MaterializedView {
        name: QualifiedName::new("mv"),
        replace: false,
        to: Some(QualifiedName::new("target")),
        populate: false,
    };
    let create = CreateStatement::new(kind)
        .with_part(CreatePart::Select(Box::new(SelectStatement::star_from(
            TableRef::table("src"),
        ))))
        .unwrap();
    assert_eq!(
        create,
        parse_create("CREATE MATERIALIZED VIEW mv TO target AS SELECT * FROM src")
    );
}

#[test]
fn materialized_view_with_engine_and_populate() {
    let sql = "CREATE MATERIALIZED VIEW IF NOT EXISTS db.mv \
               ENGINE = SummingMergeTree() ORDER BY k POPULATE \
               AS SELECT k, count() AS c FROM db.src GROUP BY k";
    let create = parse_create(sql);
    assert!(matches!(
        create.kind(),
        CreateKind::MaterializedView { populate: true, .. }
    ));
    assert_eq!(
        create.to_sql(),
        "CREATE MATERIALIZED VIEW IF NOT EXISTS db.mv\n\
         ENGINE = SummingMergeTree()\n\
         ORDER BY k POPULATE AS\n\
         SELECT k, count() AS c FROM db.src GROUP BY k"
    );
}

#[test]
fn materialized_view_to_with_columns() {
    assert_eq!(
        parse(
            "CREATE MATERIALIZED VIEW db.mv TO db.target (k UInt64) \
             AS SELECT k FROM db.src"
        )
        .to_sql(),
        "CREATE MATERIALIZED VIEW db.mv TO db.target\n(\n    k UInt64\n) AS\nSELECT k FROM db.src"
    );
}

#[test]
fn materialized_requires_view() {
    let _ = parse_err("CREATE MATERIALIZED TABLE t (x Int8)");
}

#[test]
fn materialized_view_children() {
    let mut create = parse_create(
        "CREATE MATERIALIZED VIEW mv ENGINE = Memory AS SELECT 1",
    );
    assert_eq!(create.children().len(), 2);
    assert!(create.detach(CreateSlot::Storage).is_some());
    assert_eq!(create.children().len(), 1);
    assert!(create.storage().is_none());
    assert_eq!(create.to_sql(), "CREATE MATERIALIZED VIEW mv AS\nSELECT 1");
}

// ===================================================================
// Round trips
// ===================================================================

#[test]
fn round_trips() {
    round_trip("CREATE VIEW v AS SELECT DISTINCT a, b FROM t WHERE a IN (1, 2) AND NOT b LIKE 'x%'");
    round_trip("CREATE MATERIALIZED VIEW mv TO target AS SELECT * FROM src");
    round_trip(
        "CREATE MATERIALIZED VIEW db.mv ENGINE = AggregatingMergeTree() ORDER BY (k, d) \
         POPULATE AS SELECT k, toDate(ts) AS d, sumState(v) AS s FROM db.src GROUP BY k, d",
    );
    round_trip(
        "CREATE VIEW v AS SELECT CASE WHEN x > 0 THEN 'pos' ELSE 'neg' END AS sign, \
         CAST(y AS String) FROM t WHERE z BETWEEN 1 AND 10 OR z IS NULL",
    );
}
