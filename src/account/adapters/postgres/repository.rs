//! `PostgreSQL` repository implementation for account storage.

use super::{
    models::{AccountRow, NewAccountRow},
    schema::accounts,
};
use crate::account::{
    domain::{Account, AccountId, PersistedAccountData, Role},
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by account adapters.
pub type AccountPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed account repository.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: AccountPgPool,
}

impl PostgresAccountRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccountPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AccountRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AccountRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AccountRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AccountRepositoryError::persistence)?
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn store(&self, account: &Account) -> AccountRepositoryResult<()> {
        let account_id = account.id();
        let new_row = to_new_row(account)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(accounts::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AccountRepositoryError::DuplicateAccount(account_id)
                    }
                    _ => AccountRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, account: &Account) -> AccountRepositoryResult<()> {
        let account_id = account.id();
        let row = to_new_row(account)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                accounts::table.filter(accounts::id.eq(account_id.into_inner())),
            )
            .set((
                accounts::full_name.eq(row.full_name),
                accounts::role.eq(row.role),
                accounts::completed_tasks.eq(row.completed_tasks),
                accounts::is_active.eq(row.is_active),
                accounts::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(AccountRepositoryError::persistence)?;

            if updated == 0 {
                return Err(AccountRepositoryError::NotFound(account_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>> {
        self.run_blocking(move |connection| {
            let row = accounts::table
                .filter(accounts::id.eq(id.into_inner()))
                .select(AccountRow::as_select())
                .first::<AccountRow>(connection)
                .optional()
                .map_err(AccountRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn increment_completed_tasks(&self, id: AccountId) -> AccountRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                accounts::table.filter(accounts::id.eq(id.into_inner())),
            )
            .set((
                accounts::completed_tasks.eq(accounts::completed_tasks + 1),
                accounts::updated_at.eq(now),
            ))
            .execute(connection)
            .map_err(AccountRepositoryError::persistence)?;

            if updated == 0 {
                return Err(AccountRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(account: &Account) -> AccountRepositoryResult<NewAccountRow> {
    let completed_tasks =
        i32::try_from(account.completed_tasks()).map_err(AccountRepositoryError::persistence)?;

    Ok(NewAccountRow {
        id: account.id().into_inner(),
        full_name: account.full_name().to_owned(),
        role: account.role().as_str().to_owned(),
        completed_tasks,
        is_active: account.is_active(),
        created_at: account.created_at(),
        updated_at: account.updated_at(),
    })
}

fn row_to_account(row: AccountRow) -> AccountRepositoryResult<Account> {
    let role = Role::try_from(row.role.as_str()).map_err(AccountRepositoryError::persistence)?;
    let completed_tasks =
        u32::try_from(row.completed_tasks).map_err(AccountRepositoryError::persistence)?;

    Ok(Account::from_persisted(PersistedAccountData {
        id: AccountId::from_uuid(row.id),
        full_name: row.full_name,
        role,
        completed_tasks,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
