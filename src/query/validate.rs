use std::collections::HashSet;

use crate::catalog::{RootCatalogRef, TableCatalogRef};
use crate::query::{
    AggCall, AggKind, AssignValue, ColumnRef, DeleteQuery, InsertQuery, Predicate, ProjectionItem,
    QueryDescription, SelectQuery, UpdateQuery,
};
use crate::storage::Row;
use crate::types::DataTypeKind;

/// The error type for malformed query descriptions.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("table appears twice in scope: {0}")]
    DuplicateTable(String),
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnRef),
    #[error("table {0} is not in the from clause")]
    TableNotInScope(String),
    #[error("type mismatch on column {column}: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        column: String,
        expected: DataTypeKind,
        found: Option<DataTypeKind>,
    },
    #[error("aggregator {0} requires a numeric column: {1}")]
    AggregateNotNumeric(AggKind, ColumnRef),
    #[error("aggregator {0} requires a column argument")]
    AggregateRequiresColumn(AggKind),
    #[error("order-by column {0} is not produced by the projection")]
    OrderByNotProjected(ColumnRef),
    #[error("select has no source table")]
    EmptyFrom,
    #[error("column {column} of table {table} is not nullable")]
    NotNullable { table: String, column: String },
}

/// Resolves every name of a query description against the catalog. All
/// checks run before planning; a query that validates can be planned.
pub struct Validator {
    catalog: RootCatalogRef,
}

impl Validator {
    pub fn new(catalog: RootCatalogRef) -> Validator {
        Validator { catalog }
    }

    pub fn validate(&self, query: &QueryDescription) -> Result<(), ValidationError> {
        match query {
            QueryDescription::Select(select) => self.validate_select(select),
            QueryDescription::Insert(insert) => self.validate_insert(insert),
            QueryDescription::Update(update) => self.validate_update(update),
            QueryDescription::Delete(delete) => self.validate_delete(delete),
        }
    }

    fn table(&self, name: &str) -> Result<TableCatalogRef, ValidationError> {
        self.catalog
            .get_table_by_name(name)
            .ok_or_else(|| ValidationError::UnknownTable(name.into()))
    }

    fn validate_select(&self, select: &SelectQuery) -> Result<(), ValidationError> {
        if select.from.is_empty() {
            return Err(ValidationError::EmptyFrom);
        }
        let mut scope = HashSet::new();
        for name in select
            .from
            .iter()
            .chain(select.joins.iter().map(|j| &j.table))
        {
            self.table(name)?;
            if !scope.insert(name.as_str()) {
                return Err(ValidationError::DuplicateTable(name.clone()));
            }
        }

        for join in &select.joins {
            self.check_predicate(&join.on, &scope)?;
        }
        if let Some(predicate) = &select.predicate {
            self.check_predicate(predicate, &scope)?;
        }

        for item in &select.projection {
            match item {
                ProjectionItem::Column(col) => self.check_column(col, &scope)?,
                ProjectionItem::Aggregate(call) => self.check_aggregate(call, &scope)?,
            }
        }

        for pair in &select.order_by {
            self.check_column(&pair.column, &scope)?;
            // the order operator runs above the projection, so with an
            // explicit projection the key must survive it
            if !select.projection.is_empty() {
                let projected = select.projection.iter().any(|item| match item {
                    ProjectionItem::Column(col) => col == &pair.column,
                    ProjectionItem::Aggregate(call) => {
                        call.kind == AggKind::Distinct && call.column.as_ref() == Some(&pair.column)
                    }
                });
                if !projected {
                    return Err(ValidationError::OrderByNotProjected(pair.column.clone()));
                }
            }
        }
        Ok(())
    }

    fn validate_insert(&self, insert: &InsertQuery) -> Result<(), ValidationError> {
        let table = self.table(&insert.table)?;
        for row in &insert.rows {
            self.check_row(&table, row)?;
        }
        Ok(())
    }

    fn validate_update(&self, update: &UpdateQuery) -> Result<(), ValidationError> {
        let table = self.table(&update.table)?;
        let scope = HashSet::from([update.table.as_str()]);
        if let Some(predicate) = &update.predicate {
            self.check_predicate(predicate, &scope)?;
        }
        for assignment in &update.assignments {
            let column = table.get_column_by_name(&assignment.column).ok_or_else(|| {
                ValidationError::UnknownColumn(ColumnRef::new(&update.table, &assignment.column))
            })?;
            match &assignment.value {
                AssignValue::Value(value) => {
                    let kind = column.datatype().kind();
                    if !value.conforms_to(kind) {
                        return Err(ValidationError::TypeMismatch {
                            column: assignment.column.clone(),
                            expected: kind,
                            found: value.kind(),
                        });
                    }
                    if value.is_null() && !column.is_nullable() {
                        return Err(ValidationError::NotNullable {
                            table: update.table.clone(),
                            column: assignment.column.clone(),
                        });
                    }
                }
                AssignValue::Column(source) => {
                    if table.get_column_by_name(source).is_none() {
                        return Err(ValidationError::UnknownColumn(ColumnRef::new(
                            &update.table,
                            source,
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_delete(&self, delete: &DeleteQuery) -> Result<(), ValidationError> {
        self.table(&delete.table)?;
        if let Some(predicate) = &delete.predicate {
            let scope = HashSet::from([delete.table.as_str()]);
            self.check_predicate(predicate, &scope)?;
        }
        Ok(())
    }

    fn check_column(&self, col: &ColumnRef, scope: &HashSet<&str>) -> Result<(), ValidationError> {
        if !scope.contains(col.table.as_str()) {
            return Err(ValidationError::TableNotInScope(col.table.clone()));
        }
        let table = self.table(&col.table)?;
        if !table.contains_column(&col.column) {
            return Err(ValidationError::UnknownColumn(col.clone()));
        }
        Ok(())
    }

    fn check_predicate(
        &self,
        predicate: &Predicate,
        scope: &HashSet<&str>,
    ) -> Result<(), ValidationError> {
        for col in predicate.columns() {
            self.check_column(col, scope)?;
        }
        self.check_literal_types(predicate)
    }

    fn check_literal_types(&self, predicate: &Predicate) -> Result<(), ValidationError> {
        use crate::query::Operand;
        match predicate {
            Predicate::Compare {
                left,
                right: Operand::Value(value),
                ..
            } => self.check_literal(left, value),
            Predicate::Compare { .. } | Predicate::IsNull { .. } => Ok(()),
            Predicate::Between { column, low, high } => {
                self.check_literal(column, low)?;
                self.check_literal(column, high)
            }
            Predicate::In { column, values } => {
                values.iter().try_for_each(|v| self.check_literal(column, v))
            }
            Predicate::And(a, b) | Predicate::Or(a, b) => {
                self.check_literal_types(a)?;
                self.check_literal_types(b)
            }
            Predicate::Not(p) => self.check_literal_types(p),
        }
    }

    fn check_literal(
        &self,
        col: &ColumnRef,
        value: &crate::types::DataValue,
    ) -> Result<(), ValidationError> {
        let table = self.table(&col.table)?;
        let column = table
            .get_column_by_name(&col.column)
            .ok_or_else(|| ValidationError::UnknownColumn(col.clone()))?;
        let kind = column.datatype().kind();
        if !value.conforms_to(kind) {
            return Err(ValidationError::TypeMismatch {
                column: col.to_string(),
                expected: kind,
                found: value.kind(),
            });
        }
        Ok(())
    }

    fn check_aggregate(&self, call: &AggCall, scope: &HashSet<&str>) -> Result<(), ValidationError> {
        let column = match &call.column {
            Some(column) => column,
            // only count may omit its argument
            None if call.kind == AggKind::Count => return Ok(()),
            None => return Err(ValidationError::AggregateRequiresColumn(call.kind)),
        };
        self.check_column(column, scope)?;
        if matches!(call.kind, AggKind::Sum | AggKind::Avg | AggKind::Stddev) {
            let table = self.table(&column.table)?;
            let desc = table
                .get_column_by_name(&column.column)
                .ok_or_else(|| ValidationError::UnknownColumn(column.clone()))?;
            if !desc.datatype().kind().is_numeric() {
                return Err(ValidationError::AggregateNotNumeric(
                    call.kind,
                    column.clone(),
                ));
            }
        }
        Ok(())
    }

    fn check_row(&self, table: &TableCatalogRef, row: &Row) -> Result<(), ValidationError> {
        for (name, value) in row.values() {
            let column = table.get_column_by_name(name).ok_or_else(|| {
                ValidationError::UnknownColumn(ColumnRef::new(table.name(), name))
            })?;
            let kind = column.datatype().kind();
            if !value.conforms_to(kind) {
                return Err(ValidationError::TypeMismatch {
                    column: name.clone(),
                    expected: kind,
                    found: value.kind(),
                });
            }
        }
        for column in table.all_columns() {
            if !column.is_nullable() && row.get(column.name()).is_null() {
                return Err(ValidationError::NotNullable {
                    table: table.name().into(),
                    column: column.name().into(),
                });
            }
        }
        Ok(())
    }
}
