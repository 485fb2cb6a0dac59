//! Per-entity repository over SQLite: list, get, create, update, delete.

use crate::error::AppError;
use crate::model::Resource;
use crate::service::validation::WriteSet;
use crate::sql::{
    bind_params, delete, insert, select_by_id, select_list, update, BindValue, QueryBuf,
};
use sqlx::{Row, SqlitePool};
use std::marker::PhantomData;

/// Repository for one resource type. Cheap to build per request; holds a borrowed pool.
pub struct Repository<'a, T> {
    pool: &'a SqlitePool,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Resource> Repository<'a, T> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Repository {
            pool,
            _marker: PhantomData,
        }
    }

    /// All rows matching every filter (exact match), ordered by id.
    pub async fn list(&self, filters: &[(&str, BindValue)]) -> Result<Vec<T>, AppError> {
        let q = select_list(T::ENTITY, filters);
        self.fetch_all(&q).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<T>, AppError> {
        let q = select_by_id(T::ENTITY, id);
        self.fetch_optional(&q).await
    }

    /// Insert one row and read it back through the regular SELECT so projections are filled.
    pub async fn create(&self, values: &WriteSet) -> Result<T, AppError> {
        let q = insert(T::ENTITY, values);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_one(self.pool)
            .await?;
        let id: i64 = row.try_get(0)?;
        self.get(id)
            .await?
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Apply a partial update. Returns false when no row has this id.
    pub async fn update(&self, id: i64, values: &WriteSet) -> Result<bool, AppError> {
        match update(T::ENTITY, id, values) {
            Some(q) => Ok(self.execute(&q).await? == 1),
            None => Ok(self.exists(id).await?),
        }
    }

    /// Delete by id. Returns false when no row has this id.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let q = delete(T::ENTITY, id);
        Ok(self.execute(&q).await? == 1)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.get(id).await?.is_some())
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<T>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_all(self.pool)
            .await?;
        let items = rows.iter().map(|r| T::from_row(r)).collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<T>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.as_ref().map(|r| T::from_row(r)).transpose()?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = bind_params(sqlx::query(&q.sql), &q.params)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
