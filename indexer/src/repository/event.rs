use chrono::NaiveDateTime;
use diesel::sql_types::{Nullable, Timestamp};
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use orm::events::{BalanceEventInsertDb, SystemEventInsertDb};
use orm::schema::{balance_events, system_events};
use orm::summaries::RawBalanceSummaryRowDb;
use shared::summary::SummaryInterval;

use super::{check_err, StoreResult};

pub fn insert_balance_events(
    conn: &mut PgConnection,
    events: &[BalanceEventInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(balance_events::table)
        .values(events)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn insert_system_events(
    conn: &mut PgConnection,
    events: &[SystemEventInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(system_events::table)
        .values(events)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn most_recent_balance_event_time(
    conn: &mut PgConnection,
) -> StoreResult<NaiveDateTime> {
    balance_events::table
        .select(balance_events::time)
        .order(balance_events::time.desc())
        .first(conn)
        .map_err(check_err)
}

pub fn most_recent_system_event_time(
    conn: &mut PgConnection,
) -> StoreResult<NaiveDateTime> {
    system_events::table
        .select(system_events::time)
        .order(system_events::time.desc())
        .first(conn)
        .map_err(check_err)
}

pub fn delete_balance_events_older_than(
    conn: &mut PgConnection,
    threshold: NaiveDateTime,
) -> StoreResult<usize> {
    diesel::delete(
        balance_events::table.filter(balance_events::time.lt(threshold)),
    )
    .execute(conn)
    .map_err(check_err)
}

pub fn delete_system_events_older_than(
    conn: &mut PgConnection,
    threshold: NaiveDateTime,
) -> StoreResult<usize> {
    diesel::delete(
        system_events::table.filter(system_events::time.lt(threshold)),
    )
    .execute(conn)
    .map_err(check_err)
}

/// Pre-aggregated balance movements per (address, escrow) pair, bucketed by
/// interval.
pub fn summarize_balance_events(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    cutoff: Option<NaiveDateTime>,
) -> StoreResult<Vec<RawBalanceSummaryRowDb>> {
    let query = format!(
        "SELECT date_trunc('{trunc}', time) AS time_bucket, \
                address, \
                escrow_address, \
                coalesce(sum(amount) FILTER (WHERE kind = 'reward'), 0)::numeric AS total_rewards, \
                coalesce(sum(amount) FILTER (WHERE kind = 'commission'), 0)::numeric AS total_commission, \
                coalesce(sum(amount) FILTER (WHERE kind = 'slash'), 0)::numeric AS total_slashed \
         FROM balance_events \
         WHERE $1::timestamp IS NULL OR time >= $1 \
         GROUP BY time_bucket, address, escrow_address \
         ORDER BY time_bucket",
        trunc = interval.trunc_field()
    );

    diesel::sql_query(query)
        .bind::<Nullable<Timestamp>, _>(cutoff)
        .load(conn)
        .map_err(check_err)
}
