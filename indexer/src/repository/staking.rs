use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::schema::staking_sequences;
use orm::staking::{StakingSeqDb, StakingSeqInsertDb};
use shared::block::BlockHeight;
use shared::staking::StakingSeq;

use super::{check_err, StoreResult};

pub fn upsert(
    conn: &mut PgConnection,
    staking_seq: StakingSeqInsertDb,
) -> StoreResult<()> {
    diesel::insert_into(staking_sequences::table)
        .values(&staking_seq)
        .on_conflict(staking_sequences::height)
        .do_update()
        .set(&staking_seq)
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn find_by_height(
    conn: &mut PgConnection,
    height: BlockHeight,
) -> StoreResult<StakingSeq> {
    let row: StakingSeqDb = staking_sequences::table
        .filter(staking_sequences::height.eq(height))
        .select(StakingSeqDb::as_select())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}
