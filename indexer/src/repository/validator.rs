use chrono::NaiveDateTime;
use diesel::sql_types::{Nullable, Timestamp};
use diesel::upsert::excluded;
use diesel::{
    ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
};
use orm::schema::{validator_aggregates, validator_sequences};
use orm::summaries::RawValidatorSummaryRowDb;
use orm::validators::{
    ValidatorAggDb, ValidatorAggInsertDb, ValidatorSeqDb, ValidatorSeqInsertDb,
};
use shared::block::BlockHeight;
use shared::summary::SummaryInterval;
use shared::validator::{ValidatorAgg, ValidatorSeq};

use super::{check_err, StoreResult};

pub fn upsert_seqs(
    conn: &mut PgConnection,
    seqs: &[ValidatorSeqInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(validator_sequences::table)
        .values(seqs)
        .on_conflict((
            validator_sequences::height,
            validator_sequences::entity_uid,
        ))
        .do_update()
        .set((
            validator_sequences::voting_power
                .eq(excluded(validator_sequences::voting_power)),
            validator_sequences::total_shares
                .eq(excluded(validator_sequences::total_shares)),
            validator_sequences::commission
                .eq(excluded(validator_sequences::commission)),
            validator_sequences::active_escrow_balance
                .eq(excluded(validator_sequences::active_escrow_balance)),
            validator_sequences::proposed
                .eq(excluded(validator_sequences::proposed)),
            validator_sequences::precommit_validated
                .eq(excluded(validator_sequences::precommit_validated)),
            validator_sequences::precommit_block_id_flag
                .eq(excluded(validator_sequences::precommit_block_id_flag)),
            validator_sequences::precommit_index
                .eq(excluded(validator_sequences::precommit_index)),
            validator_sequences::rewards
                .eq(excluded(validator_sequences::rewards)),
        ))
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn find_seqs_by_height(
    conn: &mut PgConnection,
    height: BlockHeight,
) -> StoreResult<Vec<ValidatorSeq>> {
    let rows: Vec<ValidatorSeqDb> = validator_sequences::table
        .filter(validator_sequences::height.eq(height))
        .select(ValidatorSeqDb::as_select())
        .order(validator_sequences::precommit_index.asc())
        .load(conn)
        .map_err(check_err)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub fn find_most_recent_seq(
    conn: &mut PgConnection,
) -> StoreResult<ValidatorSeq> {
    let row: ValidatorSeqDb = validator_sequences::table
        .select(ValidatorSeqDb::as_select())
        .order(validator_sequences::time.desc())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

pub fn summarize_seqs(
    conn: &mut PgConnection,
    interval: SummaryInterval,
    cutoff: Option<NaiveDateTime>,
) -> StoreResult<Vec<RawValidatorSummaryRowDb>> {
    let query = format!(
        "SELECT date_trunc('{trunc}', time) AS time_bucket, \
                address, \
                avg(voting_power)::numeric AS voting_power_avg, \
                max(voting_power)::bigint AS voting_power_max, \
                min(voting_power)::bigint AS voting_power_min, \
                avg(total_shares)::numeric AS total_shares_avg, \
                max(total_shares)::numeric AS total_shares_max, \
                min(total_shares)::numeric AS total_shares_min, \
                avg(active_escrow_balance)::numeric AS active_escrow_balance_avg, \
                max(active_escrow_balance)::numeric AS active_escrow_balance_max, \
                min(active_escrow_balance)::numeric AS active_escrow_balance_min, \
                avg(commission)::numeric AS commission_avg, \
                max(commission)::numeric AS commission_max, \
                min(commission)::numeric AS commission_min, \
                (count(*) FILTER (WHERE precommit_validated))::bigint AS validated_sum, \
                (count(*) FILTER (WHERE precommit_validated = FALSE))::bigint AS not_validated_sum, \
                (count(*) FILTER (WHERE proposed))::bigint AS proposed_sum, \
                coalesce(avg(CASE WHEN precommit_validated THEN 1.0 ELSE 0.0 END), 0)::numeric AS uptime_avg, \
                sum(rewards)::numeric AS rewards_sum \
         FROM validator_sequences \
         WHERE $1::timestamp IS NULL OR time >= $1 \
         GROUP BY time_bucket, address \
         ORDER BY time_bucket",
        trunc = interval.trunc_field()
    );

    diesel::sql_query(query)
        .bind::<Nullable<Timestamp>, _>(cutoff)
        .load(conn)
        .map_err(check_err)
}

pub fn delete_seqs_older_than(
    conn: &mut PgConnection,
    threshold: NaiveDateTime,
) -> StoreResult<usize> {
    diesel::delete(
        validator_sequences::table
            .filter(validator_sequences::time.lt(threshold)),
    )
    .execute(conn)
    .map_err(check_err)
}

pub fn find_agg_by_entity_uid(
    conn: &mut PgConnection,
    entity_uid: &str,
) -> StoreResult<ValidatorAgg> {
    let row: ValidatorAggDb = validator_aggregates::table
        .filter(validator_aggregates::entity_uid.eq(entity_uid))
        .select(ValidatorAggDb::as_select())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

pub fn upsert_aggs(
    conn: &mut PgConnection,
    aggs: &[ValidatorAggInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(validator_aggregates::table)
        .values(aggs)
        .on_conflict(validator_aggregates::entity_uid)
        .do_update()
        .set((
            validator_aggregates::recent_address
                .eq(excluded(validator_aggregates::recent_address)),
            validator_aggregates::recent_tendermint_address
                .eq(excluded(validator_aggregates::recent_tendermint_address)),
            validator_aggregates::recent_voting_power
                .eq(excluded(validator_aggregates::recent_voting_power)),
            validator_aggregates::recent_total_shares
                .eq(excluded(validator_aggregates::recent_total_shares)),
            validator_aggregates::recent_height
                .eq(excluded(validator_aggregates::recent_height)),
            validator_aggregates::recent_time
                .eq(excluded(validator_aggregates::recent_time)),
        ))
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}
