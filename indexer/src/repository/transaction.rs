use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::schema::transaction_sequences;
use orm::transactions::{TransactionSeqDb, TransactionSeqInsertDb};
use shared::block::BlockHeight;
use shared::transaction::TransactionSeq;

use super::{check_err, StoreResult};

pub fn insert_seqs(
    conn: &mut PgConnection,
    seqs: &[TransactionSeqInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(transaction_sequences::table)
        .values(seqs)
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}

pub fn find_seqs_by_height(
    conn: &mut PgConnection,
    height: BlockHeight,
) -> StoreResult<Vec<TransactionSeq>> {
    let rows: Vec<TransactionSeqDb> = transaction_sequences::table
        .filter(transaction_sequences::height.eq(height))
        .select(TransactionSeqDb::as_select())
        .order(transaction_sequences::id.asc())
        .load(conn)
        .map_err(check_err)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
