use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::delegations::{
    DebondingDelegationSeqDb, DebondingDelegationSeqInsertDb, DelegationSeqDb,
    DelegationSeqInsertDb,
};
use orm::schema::{debonding_delegation_sequences, delegation_sequences};
use shared::block::BlockHeight;
use shared::staking::{DebondingDelegationSeq, DelegationSeq};

use super::{check_err, StoreResult};

pub fn insert_seqs(
    conn: &mut PgConnection,
    seqs: &[DelegationSeqInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(delegation_sequences::table)
        .values(seqs)
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn find_seqs_by_height(
    conn: &mut PgConnection,
    height: BlockHeight,
) -> StoreResult<Vec<DelegationSeq>> {
    let rows: Vec<DelegationSeqDb> = delegation_sequences::table
        .filter(delegation_sequences::height.eq(height))
        .select(DelegationSeqDb::as_select())
        .order(delegation_sequences::id.asc())
        .load(conn)
        .map_err(check_err)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub fn insert_debonding_seqs(
    conn: &mut PgConnection,
    seqs: &[DebondingDelegationSeqInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(debonding_delegation_sequences::table)
        .values(seqs)
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn find_debonding_seqs_by_height(
    conn: &mut PgConnection,
    height: BlockHeight,
) -> StoreResult<Vec<DebondingDelegationSeq>> {
    let rows: Vec<DebondingDelegationSeqDb> =
        debonding_delegation_sequences::table
            .filter(debonding_delegation_sequences::height.eq(height))
            .select(DebondingDelegationSeqDb::as_select())
            .order(debonding_delegation_sequences::id.asc())
            .load(conn)
            .map_err(check_err)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
