use chrono::NaiveDateTime;
use diesel::dsl::sql;
use diesel::expression::BoxableExpression;
use diesel::pg::Pg;
use diesel::sql_types::{Bool, Nullable, Timestamp};
use diesel::{
    BoolExpressionMethods, ExpressionMethods, PgConnection, QueryDsl,
    RunQueryDsl, SelectableHelper,
};
use orm::blocks::{BlockSeqDb, BlockSeqInsertDb};
use orm::schema::block_sequences;
use orm::summaries::RawBlockSummaryRowDb;
use shared::block::{BlockHeight, BlockSeq};
use shared::summary::{ActivityPeriod, SummaryInterval};

use super::{check_err, StoreResult};

pub fn upsert(
    conn: &mut PgConnection,
    block_seq: BlockSeqInsertDb,
) -> StoreResult<()> {
    diesel::insert_into(block_sequences::table)
        .values(&block_seq)
        .on_conflict(block_sequences::height)
        .do_update()
        .set(&block_seq)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn find_by_height(
    conn: &mut PgConnection,
    height: BlockHeight,
) -> StoreResult<BlockSeq> {
    let row: BlockSeqDb = block_sequences::table
        .filter(block_sequences::height.eq(height))
        .select(BlockSeqDb::as_select())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

pub fn find_most_recent(conn: &mut PgConnection) -> StoreResult<BlockSeq> {
    let row: BlockSeqDb = block_sequences::table
        .select(BlockSeqDb::as_select())
        .order(block_sequences::time.desc())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

/// Pre-aggregated block rows bucketed by interval. Rows before the cutoff are
/// already covered by summaries and are left out.
pub fn summarize(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    cutoff: Option<NaiveDateTime>,
) -> StoreResult<Vec<RawBlockSummaryRowDb>> {
    let query = format!(
        "SELECT date_trunc('{trunc}', time) AS time_bucket, \
                count(*)::bigint AS count, \
                (CASE WHEN count(*) > 1 \
                      THEN extract(epoch FROM max(time) - min(time)) / (count(*) - 1) \
                      ELSE 0 END)::numeric AS block_time_avg \
         FROM block_sequences \
         WHERE $1::timestamp IS NULL OR time >= $1 \
         GROUP BY time_bucket \
         ORDER BY time_bucket",
        trunc = interval.trunc_field()
    );

    diesel::sql_query(query)
        .bind::<Nullable<Timestamp>, _>(cutoff)
        .load(conn)
        .map_err(check_err)
}

/// Deletes block sequences older than the threshold, but only inside covered
/// activity periods so unsummarized heights survive.
pub fn delete_older_than(
    conn: &mut PgConnection,
    threshold: NaiveDateTime,
    activity_periods: &[ActivityPeriod],
    bucket_length: chrono::Duration,
) -> StoreResult<usize> {
    if activity_periods.is_empty() {
        return Ok(0);
    }

    let mut covered: Box<
        dyn BoxableExpression<block_sequences::table, Pg, SqlType = Bool>,
    > = Box::new(sql::<Bool>("FALSE"));
    for period in activity_periods {
        let period_close = period.period_end + bucket_length;
        covered = Box::new(covered.or(block_sequences::time
            .ge(period.period_start)
            .and(block_sequences::time.lt(period_close))));
    }

    diesel::delete(
        block_sequences::table
            .filter(block_sequences::time.lt(threshold).and(covered)),
    )
    .execute(conn)
    .map_err(check_err)
}
