use chrono::NaiveDateTime;
use diesel::upsert::excluded;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::schema::syncables;
use orm::syncables::{SyncableDb, SyncableInsertDb, SyncableKindDb};
use shared::block::BlockHeight;
use shared::syncable::{Syncable, SyncableKind};

use super::{check_err, StoreResult};

pub fn find_by_height_and_kind(
    conn: &mut PgConnection,
    height: BlockHeight,
    kind: SyncableKind,
) -> StoreResult<Syncable> {
    let row: SyncableDb = syncables::table
        .filter(syncables::height.eq(height))
        .filter(syncables::kind.eq(SyncableKindDb::from(kind)))
        .select(SyncableDb::as_select())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

pub fn find_most_recent_height(
    conn: &mut PgConnection,
) -> StoreResult<BlockHeight> {
    syncables::table
        .filter(syncables::processed_at.is_not_null())
        .select(syncables::height)
        .order(syncables::height.desc())
        .first(conn)
        .map_err(check_err)
}

pub fn first_height_with_different_index_version(
    conn: &mut PgConnection,
    index_version: i64,
) -> StoreResult<BlockHeight> {
    syncables::table
        .filter(syncables::index_version.ne(index_version))
        .select(syncables::height)
        .order(syncables::height.asc())
        .first(conn)
        .map_err(check_err)
}

pub fn most_recent_height_with_different_index_version(
    conn: &mut PgConnection,
    index_version: i64,
) -> StoreResult<BlockHeight> {
    syncables::table
        .filter(syncables::index_version.ne(index_version))
        .select(syncables::height)
        .order(syncables::height.desc())
        .first(conn)
        .map_err(check_err)
}

pub fn upsert(
    conn: &mut PgConnection,
    syncable: SyncableInsertDb,
) -> StoreResult<()> {
    diesel::insert_into(syncables::table)
        .values(&syncable)
        .on_conflict((syncables::height, syncables::kind))
        .do_update()
        .set((
            syncables::chain_id.eq(excluded(syncables::chain_id)),
            syncables::time.eq(excluded(syncables::time)),
            syncables::data.eq(excluded(syncables::data)),
            syncables::report_id.eq(excluded(syncables::report_id)),
            syncables::processed_at.eq(excluded(syncables::processed_at)),
        ))
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

/// Stamps every syncable of the height as processed at the given version.
/// Runs only after all persistor tasks for the height have settled.
pub fn mark_processed(
    conn: &mut PgConnection,
    height: BlockHeight,
    index_version: i64,
    now: NaiveDateTime,
) -> StoreResult<()> {
    diesel::update(syncables::table.filter(syncables::height.eq(height)))
        .set((
            syncables::index_version.eq(index_version),
            syncables::processed_at.eq(Some(now)),
        ))
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

/// Reassigns a height range to a new report and clears its processed marks in
/// one statement, so a resumed reindex replays exactly these heights.
pub fn assign_report_and_clear_processed(
    conn: &mut PgConnection,
    report_id: i64,
    start_height: BlockHeight,
    end_height: BlockHeight,
) -> StoreResult<()> {
    diesel::update(
        syncables::table
            .filter(syncables::height.ge(start_height))
            .filter(syncables::height.le(end_height)),
    )
    .set((
        syncables::report_id.eq(Some(report_id)),
        syncables::processed_at.eq(None::<NaiveDateTime>),
    ))
    .execute(conn)
    .map_err(check_err)?;

    Ok(())
}
