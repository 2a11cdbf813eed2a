//! Typed object access for a model on one connection

use super::meta::{Model, ModelMeta};
use crate::connection::DatabaseConnection;
use crate::error::{DatabaseError, Result};
use sea_query::{
	Alias, Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder, Value,
};
use sqlx::Row;
use std::marker::PhantomData;

/// Queries for model `M` on a single connection
///
/// # Examples
///
/// ```rust,ignore
/// let authors = objects::<Author>(&conn).all().await?;
/// let boris = objects::<Author>(&conn).get(1).await?;
/// ```
pub struct Objects<'a, M> {
	conn: &'a DatabaseConnection,
	_model: PhantomData<fn() -> M>,
}

pub fn objects<M: Model>(conn: &DatabaseConnection) -> Objects<'_, M> {
	Objects {
		conn,
		_model: PhantomData,
	}
}

impl<M: Model> Objects<'_, M> {
	/// All rows ordered by primary key
	pub async fn all(&self) -> Result<Vec<M>> {
		let stmt = select_all(&M::meta())
			.order_by(Alias::new("id"), Order::Asc)
			.to_owned();
		let sql = stmt.to_string(SqliteQueryBuilder);
		let rows = self.conn.fetch_all(&sql).await?;
		rows.iter()
			.map(|row| M::from_row(row).map_err(DatabaseError::from))
			.collect()
	}

	/// Row with the given primary key, `None` if there is none
	pub async fn get(&self, pk: i64) -> Result<Option<M>> {
		let sql = select_by_pk(&M::meta(), pk);
		match self.conn.fetch_optional(&sql).await? {
			Some(row) => Ok(Some(M::from_row(&row)?)),
			None => Ok(None),
		}
	}

	pub async fn count(&self) -> Result<i64> {
		let stmt = Query::select()
			.expr_as(Func::count(Expr::col(Alias::new("id"))), Alias::new("total"))
			.from(Alias::new(M::meta().db_table()))
			.to_owned();
		let sql = stmt.to_string(SqliteQueryBuilder);
		let row = self.conn.fetch_optional(&sql).await?;
		match row {
			Some(row) => Ok(row.try_get::<i64, _>("total")?),
			None => Ok(0),
		}
	}

	/// Insert a row and return its primary key
	///
	/// `values` maps column names to values; include `id` to choose the key.
	pub async fn create<K>(&self, values: impl IntoIterator<Item = (K, Value)>) -> Result<i64>
	where
		K: AsRef<str>,
	{
		insert_row(self.conn, &M::meta(), values).await
	}
}

pub(crate) fn select_all(meta: &ModelMeta) -> SelectStatement {
	Query::select()
		.columns(meta.column_names().into_iter().map(Alias::new))
		.from(Alias::new(meta.db_table()))
		.to_owned()
}

pub(crate) fn select_by_pk(meta: &ModelMeta, pk: i64) -> String {
	select_all(meta)
		.and_where(Expr::col(Alias::new("id")).eq(pk))
		.to_owned()
		.to_string(SqliteQueryBuilder)
}

pub(crate) async fn insert_row<K>(
	conn: &DatabaseConnection,
	meta: &ModelMeta,
	values: impl IntoIterator<Item = (K, Value)>,
) -> Result<i64>
where
	K: AsRef<str>,
{
	let (columns, exprs): (Vec<Alias>, Vec<Expr>) = values
		.into_iter()
		.map(|(column, value)| (Alias::new(column.as_ref()), Expr::val(value)))
		.unzip();
	if columns.is_empty() {
		return Err(DatabaseError::Query(format!(
			"no values given for a new {} row",
			meta.label()
		)));
	}

	let mut stmt = Query::insert();
	stmt.into_table(Alias::new(meta.db_table())).columns(columns);
	stmt.values(exprs)
		.map_err(|e| DatabaseError::Query(e.to_string()))?;
	let sql = stmt.to_string(SqliteQueryBuilder);
	conn.insert(&sql).await
}
