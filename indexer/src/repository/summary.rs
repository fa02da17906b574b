use chrono::NaiveDateTime;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::schema::{balance_summaries, block_summaries, validator_summaries};
use orm::summaries::{
    ActivityPeriodRowDb, BalanceSummaryDb, BalanceSummaryInsertDb,
    BalanceSummaryUpdateDb, BlockSummaryDb, BlockSummaryInsertDb,
    BlockSummaryUpdateDb, SummaryIntervalDb, ValidatorSummaryDb,
    ValidatorSummaryInsertDb, ValidatorSummaryUpdateDb,
};
use shared::summary::{ActivityPeriod, SummaryInterval};

use super::{check_err, StoreResult};

fn bucket_step(interval: SummaryInterval) -> &'static str {
    match interval {
        SummaryInterval::Hourly => "1 hour",
        SummaryInterval::Daily => "1 day",
    }
}

/// Contiguous spans of buckets a summary table already covers at this index
/// version. Consecutive buckets collapse into one period.
fn find_activity_periods(
    conn: &mut PgConnection,
    table: &str,
    interval: SummaryInterval,
    index_version: i64,
) -> StoreResult<Vec<ActivityPeriod>> {
    let query = format!(
        "WITH buckets AS ( \
             SELECT DISTINCT time_bucket \
             FROM {table} \
             WHERE time_interval = '{interval}' AND index_version = $1 \
         ), grouped AS ( \
             SELECT time_bucket, \
                    time_bucket - (row_number() OVER (ORDER BY time_bucket) * interval '{step}') AS grp \
             FROM buckets \
         ) \
         SELECT min(time_bucket) AS period_start, \
                max(time_bucket) AS period_end \
         FROM grouped \
         GROUP BY grp \
         ORDER BY period_start",
        table = table,
        interval = interval,
        step = bucket_step(interval),
    );

    let rows: Vec<ActivityPeriodRowDb> = diesel::sql_query(query)
        .bind::<diesel::sql_types::Int8, _>(index_version)
        .load(conn)
        .map_err(check_err)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub fn block_summary_activity_periods(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    index_version: i64,
) -> StoreResult<Vec<ActivityPeriod>> {
    find_activity_periods(conn, "block_summaries", interval, index_version)
}

pub fn validator_summary_activity_periods(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    index_version: i64,
) -> StoreResult<Vec<ActivityPeriod>> {
    find_activity_periods(conn, "validator_summaries", interval, index_version)
}

pub fn balance_summary_activity_periods(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    index_version: i64,
) -> StoreResult<Vec<ActivityPeriod>> {
    find_activity_periods(conn, "balance_summaries", interval, index_version)
}

pub fn find_block_summary(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    time_bucket: NaiveDateTime,
    index_version: i64,
) -> StoreResult<BlockSummaryDb> {
    block_summaries::table
        .filter(
            block_summaries::time_interval
                .eq(SummaryIntervalDb::from(interval)),
        )
        .filter(block_summaries::time_bucket.eq(time_bucket))
        .filter(block_summaries::index_version.eq(index_version))
        .select(BlockSummaryDb::as_select())
        .first(conn)
        .map_err(check_err)
}

pub fn create_block_summary(
    conn: &mut PgConnection,
    summary: BlockSummaryInsertDb,
) -> StoreResult<()> {
    diesel::insert_into(block_summaries::table)
        .values(&summary)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn update_block_summary(
    conn: &mut PgConnection,
    id: i64,
    update: BlockSummaryUpdateDb,
) -> StoreResult<()> {
    diesel::update(block_summaries::table.filter(block_summaries::id.eq(id)))
        .set(&update)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn most_recent_block_summary_bucket(
    conn: &mut PgConnection,
    interval: SummaryInterval,
) -> StoreResult<NaiveDateTime> {
    block_summaries::table
        .filter(
            block_summaries::time_interval
                .eq(SummaryIntervalDb::from(interval)),
        )
        .select(block_summaries::time_bucket)
        .order(block_summaries::time_bucket.desc())
        .first(conn)
        .map_err(check_err)
}

pub fn delete_block_summaries_older_than(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    threshold: NaiveDateTime,
) -> StoreResult<usize> {
    diesel::delete(
        block_summaries::table
            .filter(
                block_summaries::time_interval
                    .eq(SummaryIntervalDb::from(interval)),
            )
            .filter(block_summaries::time_bucket.lt(threshold)),
    )
    .execute(conn)
    .map_err(check_err)
}

pub fn find_validator_summary(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    time_bucket: NaiveDateTime,
    index_version: i64,
    address: &str,
) -> StoreResult<ValidatorSummaryDb> {
    validator_summaries::table
        .filter(
            validator_summaries::time_interval
                .eq(SummaryIntervalDb::from(interval)),
        )
        .filter(validator_summaries::time_bucket.eq(time_bucket))
        .filter(validator_summaries::index_version.eq(index_version))
        .filter(validator_summaries::address.eq(address))
        .select(ValidatorSummaryDb::as_select())
        .first(conn)
        .map_err(check_err)
}

pub fn create_validator_summary(
    conn: &mut PgConnection,
    summary: ValidatorSummaryInsertDb,
) -> StoreResult<()> {
    diesel::insert_into(validator_summaries::table)
        .values(&summary)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn update_validator_summary(
    conn: &mut PgConnection,
    id: i64,
    update: ValidatorSummaryUpdateDb,
) -> StoreResult<()> {
    diesel::update(
        validator_summaries::table.filter(validator_summaries::id.eq(id)),
    )
    .set(&update)
    .execute(conn)
    .map_err(check_err)?;

    Ok(())
}

pub fn most_recent_validator_summary_bucket(
    conn: &mut PgConnection,
    interval: SummaryInterval,
) -> StoreResult<NaiveDateTime> {
    validator_summaries::table
        .filter(
            validator_summaries::time_interval
                .eq(SummaryIntervalDb::from(interval)),
        )
        .select(validator_summaries::time_bucket)
        .order(validator_summaries::time_bucket.desc())
        .first(conn)
        .map_err(check_err)
}

/// Most recent validator summary bucket across intervals, the guard that
/// keeps purge from deleting unsummarized validator sequences.
pub fn most_recent_validator_summary_bucket_any(
    conn: &mut PgConnection,
) -> StoreResult<NaiveDateTime> {
    validator_summaries::table
        .select(validator_summaries::time_bucket)
        .order(validator_summaries::time_bucket.desc())
        .first(conn)
        .map_err(check_err)
}

pub fn delete_validator_summaries_older_than(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    threshold: NaiveDateTime,
) -> StoreResult<usize> {
    diesel::delete(
        validator_summaries::table
            .filter(
                validator_summaries::time_interval
                    .eq(SummaryIntervalDb::from(interval)),
            )
            .filter(validator_summaries::time_bucket.lt(threshold)),
    )
    .execute(conn)
    .map_err(check_err)
}

pub fn find_balance_summary(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    time_bucket: NaiveDateTime,
    index_version: i64,
    address: &str,
    escrow_address: &str,
) -> StoreResult<BalanceSummaryDb> {
    balance_summaries::table
        .filter(
            balance_summaries::time_interval
                .eq(SummaryIntervalDb::from(interval)),
        )
        .filter(balance_summaries::time_bucket.eq(time_bucket))
        .filter(balance_summaries::index_version.eq(index_version))
        .filter(balance_summaries::address.eq(address))
        .filter(balance_summaries::escrow_address.eq(escrow_address))
        .select(BalanceSummaryDb::as_select())
        .first(conn)
        .map_err(check_err)
}

pub fn create_balance_summary(
    conn: &mut PgConnection,
    summary: BalanceSummaryInsertDb,
) -> StoreResult<()> {
    diesel::insert_into(balance_summaries::table)
        .values(&summary)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn update_balance_summary(
    conn: &mut PgConnection,
    id: i64,
    update: BalanceSummaryUpdateDb,
) -> StoreResult<()> {
    diesel::update(
        balance_summaries::table.filter(balance_summaries::id.eq(id)),
    )
    .set(&update)
    .execute(conn)
    .map_err(check_err)?;

    Ok(())
}
