//! Table creation for registered models

use super::meta::{ColumnKind, ModelMeta};
use super::registry::ModelRegistry;
use crate::connection::DatabaseConnection;
use crate::error::Result;
use crate::handler::ConnectionHandler;
use sea_query::{Alias, ColumnDef, ForeignKey, SqliteQueryBuilder, Table};

/// Create the table for `meta` on `conn` if it does not exist
pub async fn create_table(conn: &DatabaseConnection, meta: &ModelMeta) -> Result<()> {
	let table = Alias::new(meta.db_table());
	let mut stmt = Table::create();
	stmt.table(table.clone()).if_not_exists().col(
		ColumnDef::new(Alias::new("id"))
			.integer()
			.not_null()
			.auto_increment()
			.primary_key(),
	);
	for column in meta.columns() {
		let mut def = ColumnDef::new(Alias::new(column.name.as_str()));
		match &column.kind {
			ColumnKind::Integer => {
				def.integer();
			}
			ColumnKind::Text => {
				def.text();
			}
			ColumnKind::ForeignKey(target) => {
				def.integer();
				stmt.foreign_key(
					ForeignKey::create()
						.from(table.clone(), Alias::new(column.name.as_str()))
						.to(Alias::new(target.as_str()), Alias::new("id")),
				);
			}
		}
		stmt.col(def);
	}

	let sql = stmt.to_string(SqliteQueryBuilder);
	conn.execute(&sql).await?;
	Ok(())
}

/// Create every registered model's table on each database where migrating it
/// is allowed
pub async fn create_tables(registry: &ModelRegistry, handler: &ConnectionHandler) -> Result<()> {
	let router = handler.router();
	for alias in handler.aliases() {
		let conn = handler.get(&alias)?;
		for model in registry.get_models() {
			if router.allow_migrate(&alias, model.meta()) {
				create_table(&conn, model.meta()).await?;
			} else {
				tracing::debug!(alias = %alias, model = %model.meta(), "Skipping table creation");
			}
		}
	}
	Ok(())
}
