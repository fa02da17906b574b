use chrono::NaiveDateTime;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::reports::{ReportDb, ReportInsertDb, ReportKindDb};
use orm::schema::reports;
use shared::report::Report;

use super::{check_err, StoreResult};

pub fn create(
    conn: &mut PgConnection,
    report: ReportInsertDb,
) -> StoreResult<Report> {
    let row: ReportDb = diesel::insert_into(reports::table)
        .values(&report)
        .get_result(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

/// The single open reindex report for this index version, if any.
pub fn find_not_completed_reindex(
    conn: &mut PgConnection,
    index_version: i64,
) -> StoreResult<Report> {
    let row: ReportDb = reports::table
        .filter(reports::index_version.eq(index_version))
        .filter(reports::completed_at.is_null())
        .filter(reports::kind.eq_any([
            ReportKindDb::SequentialReindex,
            ReportKindDb::ParallelReindex,
        ]))
        .select(ReportDb::as_select())
        .order(reports::created_at.desc())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

pub fn complete(
    conn: &mut PgConnection,
    report_id: i64,
    success_count: i64,
    error_count: i64,
    error_msg: Option<String>,
    now: NaiveDateTime,
) -> StoreResult<()> {
    diesel::update(reports::table.filter(reports::id.eq(report_id)))
        .set((
            reports::success_count.eq(Some(success_count)),
            reports::error_count.eq(Some(error_count)),
            reports::error_msg.eq(error_msg),
            reports::completed_at.eq(Some(now)),
        ))
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

/// Deletes any outstanding reindex reports. Used by forced backfills.
pub fn delete_reindexing(conn: &mut PgConnection) -> StoreResult<usize> {
    diesel::delete(
        reports::table
            .filter(reports::completed_at.is_null())
            .filter(reports::kind.eq_any([
                ReportKindDb::SequentialReindex,
                ReportKindDb::ParallelReindex,
            ])),
    )
    .execute(conn)
    .map_err(check_err)
}
