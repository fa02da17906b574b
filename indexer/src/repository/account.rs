use diesel::upsert::excluded;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::accounts::{AccountAggDb, AccountAggInsertDb};
use orm::schema::account_aggregates;
use shared::account::AccountAgg;

use super::{check_err, StoreResult};

pub fn find_by_public_key(
    conn: &mut PgConnection,
    public_key: &str,
) -> StoreResult<AccountAgg> {
    let row: AccountAggDb = account_aggregates::table
        .filter(account_aggregates::public_key.eq(public_key))
        .select(AccountAggDb::as_select())
        .first(conn)
        .map_err(check_err)?;

    Ok(row.into())
}

pub fn upsert_aggs(
    conn: &mut PgConnection,
    aggs: &[AccountAggInsertDb],
) -> StoreResult<()> {
    diesel::insert_into(account_aggregates::table)
        .values(aggs)
        .on_conflict(account_aggregates::public_key)
        .do_update()
        .set((
            account_aggregates::recent_general_balance
                .eq(excluded(account_aggregates::recent_general_balance)),
            account_aggregates::recent_escrow_active_balance.eq(excluded(
                account_aggregates::recent_escrow_active_balance,
            )),
            account_aggregates::recent_escrow_debonding_balance.eq(excluded(
                account_aggregates::recent_escrow_debonding_balance,
            )),
            account_aggregates::recent_height
                .eq(excluded(account_aggregates::recent_height)),
            account_aggregates::recent_time
                .eq(excluded(account_aggregates::recent_time)),
        ))
        .execute(conn)
        .map_err(check_err)?;

    Ok(())
}
