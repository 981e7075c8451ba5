//! `PostgreSQL` repository implementation for inventory storage.
//!
//! Deductions run as filtered updates so the `current >= amount` check and
//! the decrement land in one statement; multi-item demands wrap the same
//! statements in a transaction for all-or-nothing semantics.

use super::{
    models::{InventoryItemRow, NewInventoryItemRow},
    schema::inventory_items,
};
use crate::inventory::{
    domain::{
        BranchId, InventoryItem, InventoryItemId, PersistedInventoryItemData, StockLevel, Unit,
    },
    ports::{
        InventoryRepository, InventoryRepositoryError, InventoryRepositoryResult, StockDemand,
    },
};
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by inventory adapters.
pub type InventoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed inventory repository.
#[derive(Debug, Clone)]
pub struct PostgresInventoryRepository {
    pool: InventoryPgPool,
}

impl From<DieselError> for InventoryRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresInventoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InventoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InventoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InventoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InventoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InventoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn store(&self, item: &InventoryItem) -> InventoryRepositoryResult<()> {
        let item_id = item.id();
        let new_row = to_new_row(item);

        self.run_blocking(move |connection| {
            diesel::insert_into(inventory_items::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InventoryRepositoryError::DuplicateItem(item_id)
                    }
                    _ => InventoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: InventoryItemId,
    ) -> InventoryRepositoryResult<Option<InventoryItem>> {
        self.run_blocking(move |connection| {
            let row = inventory_items::table
                .filter(inventory_items::id.eq(id.into_inner()))
                .select(InventoryItemRow::as_select())
                .first::<InventoryItemRow>(connection)
                .optional()
                .map_err(InventoryRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn list_for_branch(
        &self,
        branch_id: BranchId,
    ) -> InventoryRepositoryResult<Vec<InventoryItem>> {
        self.run_blocking(move |connection| {
            let rows = inventory_items::table
                .filter(inventory_items::branch_id.eq(branch_id.into_inner()))
                .order(inventory_items::name.asc())
                .select(InventoryItemRow::as_select())
                .load::<InventoryItemRow>(connection)
                .map_err(InventoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn deduct_stock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryRepositoryResult<InventoryItem> {
        if amount <= 0.0 {
            return Err(InventoryRepositoryError::InvalidAmount { amount });
        }

        self.run_blocking(move |connection| {
            let updated = conditional_deduct(connection, item_id, amount)?;
            if updated == 0 {
                return Err(diagnose_deduction_failure(connection, item_id, amount));
            }
            load_item(connection, item_id)
        })
        .await
    }

    async fn deduct_all(&self, demands: &[StockDemand]) -> InventoryRepositoryResult<()> {
        for demand in demands {
            if demand.amount <= 0.0 {
                return Err(InventoryRepositoryError::InvalidAmount {
                    amount: demand.amount,
                });
            }
        }
        let batch = demands.to_vec();

        self.run_blocking(move |connection| {
            connection.transaction::<_, InventoryRepositoryError, _>(|transaction| {
                for demand in &batch {
                    let updated = conditional_deduct(transaction, demand.item_id, demand.amount)?;
                    if updated == 0 {
                        // Returning the error rolls back every prior
                        // deduction in the batch.
                        return Err(diagnose_deduction_failure(
                            transaction,
                            demand.item_id,
                            demand.amount,
                        ));
                    }
                }
                Ok(())
            })
        })
        .await
    }

    async fn restock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryRepositoryResult<InventoryItem> {
        if amount <= 0.0 {
            return Err(InventoryRepositoryError::InvalidAmount { amount });
        }

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                inventory_items::table.filter(inventory_items::id.eq(item_id.into_inner())),
            )
            .set((
                inventory_items::current_quantity.eq(inventory_items::current_quantity + amount),
                inventory_items::updated_at.eq(now),
            ))
            .execute(connection)
            .map_err(InventoryRepositoryError::persistence)?;

            if updated == 0 {
                return Err(InventoryRepositoryError::NotFound(item_id));
            }
            load_item(connection, item_id)
        })
        .await
    }
}

fn conditional_deduct(
    connection: &mut PgConnection,
    item_id: InventoryItemId,
    amount: f64,
) -> InventoryRepositoryResult<usize> {
    diesel::update(
        inventory_items::table.filter(
            inventory_items::id
                .eq(item_id.into_inner())
                .and(inventory_items::is_active.eq(true))
                .and(inventory_items::current_quantity.ge(amount)),
        ),
    )
    .set((
        inventory_items::current_quantity.eq(inventory_items::current_quantity - amount),
        inventory_items::updated_at.eq(now),
    ))
    .execute(connection)
    .map_err(InventoryRepositoryError::persistence)
}

/// Works out why a conditional deduction matched no row.
fn diagnose_deduction_failure(
    connection: &mut PgConnection,
    item_id: InventoryItemId,
    requested: f64,
) -> InventoryRepositoryError {
    let row = inventory_items::table
        .filter(inventory_items::id.eq(item_id.into_inner()))
        .select(InventoryItemRow::as_select())
        .first::<InventoryItemRow>(connection)
        .optional();

    match row {
        Ok(None) => InventoryRepositoryError::NotFound(item_id),
        Ok(Some(found)) if !found.is_active => InventoryRepositoryError::InactiveItem(item_id),
        Ok(Some(found)) => InventoryRepositoryError::InsufficientStock {
            item_id,
            requested,
            available: found.current_quantity,
        },
        Err(err) => InventoryRepositoryError::persistence(err),
    }
}

fn load_item(
    connection: &mut PgConnection,
    item_id: InventoryItemId,
) -> InventoryRepositoryResult<InventoryItem> {
    let row = inventory_items::table
        .filter(inventory_items::id.eq(item_id.into_inner()))
        .select(InventoryItemRow::as_select())
        .first::<InventoryItemRow>(connection)
        .map_err(|err| match err {
            DieselError::NotFound => InventoryRepositoryError::NotFound(item_id),
            _ => InventoryRepositoryError::persistence(err),
        })?;
    row_to_item(row)
}

fn to_new_row(item: &InventoryItem) -> NewInventoryItemRow {
    NewInventoryItemRow {
        id: item.id().into_inner(),
        branch_id: item.branch_id().into_inner(),
        name: item.name().to_owned(),
        unit: item.unit().as_str().to_owned(),
        current_quantity: item.stock().current(),
        minimum_quantity: item.stock().minimum(),
        is_active: item.is_active(),
        created_at: item.created_at(),
        updated_at: item.updated_at(),
    }
}

fn row_to_item(row: InventoryItemRow) -> InventoryRepositoryResult<InventoryItem> {
    let unit = Unit::try_from(row.unit.as_str()).map_err(InventoryRepositoryError::persistence)?;
    let stock = StockLevel::new(row.current_quantity, row.minimum_quantity)
        .map_err(InventoryRepositoryError::persistence)?;

    Ok(InventoryItem::from_persisted(PersistedInventoryItemData {
        id: InventoryItemId::from_uuid(row.id),
        branch_id: BranchId::from_uuid(row.branch_id),
        name: row.name,
        unit,
        stock,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
