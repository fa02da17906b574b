use diesel::sql_types::Int8;
use diesel::{PgConnection, QueryableByName, RunQueryDsl};

use super::{check_err, StoreResult};

#[derive(QueryableByName)]
struct DatabaseSizeRow {
    #[diesel(sql_type = Int8)]
    size: i64,
}

/// Total on-disk size of the current database in bytes.
pub fn get_total_size(conn: &mut PgConnection) -> StoreResult<i64> {
    let row: DatabaseSizeRow = diesel::sql_query(
        "SELECT pg_database_size(current_database()) AS size",
    )
    .get_result(conn)
    .map_err(check_err)?;

    Ok(row.size)
}
