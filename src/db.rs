use std::collections::BTreeMap;
use std::sync::Arc;

use futures::TryStreamExt;
use tracing::debug;

use crate::catalog::{ColumnCatalog, Reference, RootCatalogRef, TableId};
use crate::executor::{Context, ExecutorBuilder, ExecutorError, AFFECTED_ROWS};
use crate::logical_planner::{LogicalPlanner, PlanError};
use crate::optimizer::Optimizer;
use crate::physical_planner::{PhysicalPlan, PhysicalPlanner};
use crate::query::{QueryDescription, ValidationError, Validator};
use crate::storage::{InMemoryStorage, StorageError, Tuple};
use crate::types::DataValue;

/// The database façade: a catalog, an in-memory store and the query
/// engine over them.
pub struct Database {
    catalog: RootCatalogRef,
    storage: Arc<InMemoryStorage>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Create a new Database instance.
    pub fn new() -> Self {
        let storage = InMemoryStorage::new();
        let catalog = storage.catalog().clone();
        Database {
            catalog,
            storage: Arc::new(storage),
        }
    }

    pub fn catalog(&self) -> &RootCatalogRef {
        &self.catalog
    }

    /// Registers a table and creates its empty backing store.
    pub fn create_table(
        &self,
        name: &str,
        columns: Vec<ColumnCatalog>,
        references: Vec<Reference>,
    ) -> Result<TableId, Error> {
        self.storage
            .create_table(name, columns, references)
            .map_err(Error::Storage)
    }

    /// Compiles a query description into an executable plan. Pure: no
    /// storage access happens until the plan is executed.
    pub fn plan(&self, query: &QueryDescription) -> Result<PhysicalPlan, Error> {
        Validator::new(self.catalog.clone()).validate(query)?;
        let logical = LogicalPlanner::new(self.catalog.clone()).plan(query)?;
        debug!(?logical, "logical plan");
        let optimized = Optimizer.optimize(logical);
        debug!(?optimized, "optimized plan");
        let physical = PhysicalPlanner.plan(&optimized)?;
        debug!(?physical, "physical plan");
        Ok(physical)
    }

    /// Runs a plan to completion under the given context.
    pub async fn execute(
        &self,
        plan: &PhysicalPlan,
        context: Arc<Context>,
    ) -> Result<QueryResult, Error> {
        let builder = ExecutorBuilder::new(self.storage.clone(), context);
        let executor = builder.build(plan).map_err(Error::from_executor)?;
        let tuples: Vec<Tuple> = executor
            .try_collect()
            .await
            .map_err(Error::from_executor)?;

        if plan.is_write() {
            let count = tuples
                .first()
                .and_then(|tuple| tuple.entries().first())
                .and_then(|entry| entry.row.get(AFFECTED_ROWS).as_i64())
                .unwrap_or(0);
            return Ok(QueryResult::Affected(count as usize));
        }

        let flat = plan.source_table_count() <= 1;
        let rows = tuples
            .into_iter()
            .map(|tuple| ResultRow::from_tuple(tuple, flat))
            .collect();
        Ok(QueryResult::Rows(rows))
    }

    /// Plans and executes a query under a fresh context.
    pub async fn run(&self, query: &QueryDescription) -> Result<QueryResult, Error> {
        let plan = self.plan(query)?;
        self.execute(&plan, Arc::new(Context::new())).await
    }

    /// Like [`Database::run`], driven to completion on the calling thread.
    /// The engine has no intrinsic concurrency, so blocking embedders lose
    /// nothing by using this.
    pub fn run_blocking(&self, query: &QueryDescription) -> Result<QueryResult, Error> {
        futures::executor::block_on(self.run(query))
    }
}

/// The result of one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Select output.
    Rows(Vec<ResultRow>),
    /// Affected-row count of a write.
    Affected(usize),
}

impl QueryResult {
    /// The rows of a select result; empty for writes.
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            QueryResult::Rows(rows) => rows,
            QueryResult::Affected(_) => &[],
        }
    }

    pub fn affected(&self) -> usize {
        match self {
            QueryResult::Affected(count) => *count,
            QueryResult::Rows(_) => 0,
        }
    }
}

/// One output row. Single-table queries produce flat column maps;
/// multi-table queries produce per-table composites.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultRow {
    Flat(BTreeMap<String, DataValue>),
    Composite(BTreeMap<String, BTreeMap<String, DataValue>>),
}

impl ResultRow {
    fn from_tuple(tuple: Tuple, flat: bool) -> ResultRow {
        if flat {
            let values = match tuple.into_single_row() {
                Some(row) => row.into_values().into_iter().collect(),
                None => BTreeMap::new(),
            };
            return ResultRow::Flat(values);
        }
        ResultRow::Composite(
            tuple
                .entries()
                .iter()
                .map(|entry| {
                    let values = entry.row.values().clone().into_iter().collect();
                    (entry.table.to_string(), values)
                })
                .collect(),
        )
    }

    /// Looks up a column of a flat row.
    pub fn get(&self, column: &str) -> Option<&DataValue> {
        match self {
            ResultRow::Flat(values) => values.get(column),
            ResultRow::Composite(_) => None,
        }
    }

    /// Looks up a column of one table of a composite row.
    pub fn get_from(&self, table: &str, column: &str) -> Option<&DataValue> {
        match self {
            ResultRow::Composite(tables) => tables.get(table)?.get(column),
            ResultRow::Flat(_) => None,
        }
    }

    /// The column names of a flat row.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            ResultRow::Flat(values) => values.keys().map(String::as_str).collect(),
            ResultRow::Composite(_) => Vec::new(),
        }
    }
}

/// The top-level error type of the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
    #[error("execute error: {0}")]
    Execute(ExecutorError),
    #[error("storage error: {0}")]
    Storage(StorageError),
    #[error("query cancelled")]
    Cancelled,
}

impl Error {
    fn from_executor(error: ExecutorError) -> Error {
        match error {
            ExecutorError::Cancelled => Error::Cancelled,
            ExecutorError::Storage(storage) => Error::Storage(storage),
            other => Error::Execute(other),
        }
    }
}
