//! Schema provisioning straight from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{comment, post, post_like, user};

/// Create every table that does not exist yet, parents before children.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, post::Entity).await?;
    create_table(db, &schema, comment::Entity).await?;
    create_table(db, &schema, post_like::Entity).await?;

    Ok(())
}

async fn create_table<E>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;

    tracing::debug!(%table, "Table ensured");
    Ok(())
}
