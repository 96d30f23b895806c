// each test binary uses a different slice of these helpers
#![allow(dead_code)]

use rowlite::catalog::ColumnCatalog;
use rowlite::catalog::Reference;
use rowlite::storage::Row;
use rowlite::types::{DataTypeExt, DataTypeKind, DataValue};
use rowlite::Database;

pub const JOB_COUNT: u64 = 50;
pub const EMPLOYEE_COUNT: u64 = 300;

/// A database seeded with 50 jobs and 300 employees, six employees per job.
pub fn seeded() -> Database {
    let db = Database::new();
    db.create_table(
        "Jobs",
        vec![
            ColumnCatalog::new(
                0,
                "id".into(),
                DataTypeKind::String.not_null().to_column_primary_key(),
            ),
            ColumnCatalog::new(1, "title".into(), DataTypeKind::String.not_null().to_column()),
            ColumnCatalog::new(2, "minSalary".into(), DataTypeKind::Int.nullable().to_column()),
            ColumnCatalog::new(3, "maxSalary".into(), DataTypeKind::Int.nullable().to_column()),
        ],
        vec![],
    )
    .unwrap();
    db.create_table(
        "Employees",
        vec![
            ColumnCatalog::new(
                0,
                "id".into(),
                DataTypeKind::String.not_null().to_column_primary_key(),
            ),
            ColumnCatalog::new(1, "jobId".into(), DataTypeKind::String.not_null().to_column()),
            ColumnCatalog::new(2, "salary".into(), DataTypeKind::Int.nullable().to_column()),
        ],
        vec![Reference {
            column: "jobId".into(),
            foreign_table: "Jobs".into(),
            foreign_column: "id".into(),
        }],
    )
    .unwrap();

    let jobs = (1..=JOB_COUNT).map(job_row).collect();
    insert(&db, "Jobs", jobs);
    let employees = (1..=EMPLOYEE_COUNT).map(employee_row).collect();
    insert(&db, "Employees", employees);
    db
}

pub fn job_row(i: u64) -> Row {
    let mut row = Row::new(i, Default::default());
    row.set("id", DataValue::from(format!("jobId{i}")));
    row.set("title", DataValue::from(format!("Job {i}")));
    row.set("minSalary", DataValue::Int64(min_salary(i)));
    row.set("maxSalary", DataValue::Int64(max_salary(i)));
    row
}

pub fn employee_row(j: u64) -> Row {
    let mut row = Row::new(j, Default::default());
    row.set("id", DataValue::from(format!("empId{j}")));
    row.set("jobId", DataValue::from(format!("jobId{}", (j - 1) % JOB_COUNT + 1)));
    row.set("salary", DataValue::Int64(40_000 + j as i64));
    row
}

pub fn min_salary(i: u64) -> i64 {
    30_000 + (i as i64 % 10) * 3_300
}

pub fn max_salary(i: u64) -> i64 {
    60_000 + (i as i64 % 7) * 4_000
}

fn insert(db: &Database, table: &str, rows: Vec<Row>) {
    use rowlite::query::{InsertQuery, QueryDescription};
    let result = db
        .run_blocking(&QueryDescription::Insert(InsertQuery {
            table: table.into(),
            rows,
            on_conflict: Default::default(),
        }))
        .unwrap();
    assert!(result.affected() > 0);
}
