use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::sql_types::{Int8, Numeric, Timestamp, VarChar};
use diesel::{AsChangeset, Insertable, Queryable, QueryableByName, Selectable};
use serde::{Deserialize, Serialize};
use shared::summary::{ActivityPeriod, SummaryInterval};

use crate::schema::{balance_summaries, block_summaries, validator_summaries};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    diesel_derive_enum::DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::SummaryInterval"]
pub enum SummaryIntervalDb {
    Hourly,
    Daily,
}

impl From<SummaryInterval> for SummaryIntervalDb {
    fn from(value: SummaryInterval) -> Self {
        match value {
            SummaryInterval::Hourly => Self::Hourly,
            SummaryInterval::Daily => Self::Daily,
        }
    }
}

impl From<SummaryIntervalDb> for SummaryInterval {
    fn from(value: SummaryIntervalDb) -> Self {
        match value {
            SummaryIntervalDb::Hourly => Self::Hourly,
            SummaryIntervalDb::Daily => Self::Daily,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = block_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockSummaryDb {
    pub id: i64,
    pub time_interval: SummaryIntervalDb,
    pub time_bucket: NaiveDateTime,
    pub index_version: i64,
    pub count: i64,
    pub block_time_avg: BigDecimal,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = block_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockSummaryInsertDb {
    pub time_interval: SummaryIntervalDb,
    pub time_bucket: NaiveDateTime,
    pub index_version: i64,
    pub count: i64,
    pub block_time_avg: BigDecimal,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = block_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockSummaryUpdateDb {
    pub count: i64,
    pub block_time_avg: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = validator_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ValidatorSummaryDb {
    pub id: i64,
    pub time_interval: SummaryIntervalDb,
    pub time_bucket: NaiveDateTime,
    pub index_version: i64,
    pub address: String,
    pub voting_power_avg: BigDecimal,
    pub voting_power_max: i64,
    pub voting_power_min: i64,
    pub total_shares_avg: BigDecimal,
    pub total_shares_max: BigDecimal,
    pub total_shares_min: BigDecimal,
    pub active_escrow_balance_avg: BigDecimal,
    pub active_escrow_balance_max: BigDecimal,
    pub active_escrow_balance_min: BigDecimal,
    pub commission_avg: BigDecimal,
    pub commission_max: BigDecimal,
    pub commission_min: BigDecimal,
    pub validated_sum: i64,
    pub not_validated_sum: i64,
    pub proposed_sum: i64,
    pub uptime_avg: BigDecimal,
    pub rewards_sum: BigDecimal,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = validator_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ValidatorSummaryInsertDb {
    pub time_interval: SummaryIntervalDb,
    pub time_bucket: NaiveDateTime,
    pub index_version: i64,
    pub address: String,
    pub voting_power_avg: BigDecimal,
    pub voting_power_max: i64,
    pub voting_power_min: i64,
    pub total_shares_avg: BigDecimal,
    pub total_shares_max: BigDecimal,
    pub total_shares_min: BigDecimal,
    pub active_escrow_balance_avg: BigDecimal,
    pub active_escrow_balance_max: BigDecimal,
    pub active_escrow_balance_min: BigDecimal,
    pub commission_avg: BigDecimal,
    pub commission_max: BigDecimal,
    pub commission_min: BigDecimal,
    pub validated_sum: i64,
    pub not_validated_sum: i64,
    pub proposed_sum: i64,
    pub uptime_avg: BigDecimal,
    pub rewards_sum: BigDecimal,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = validator_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ValidatorSummaryUpdateDb {
    pub voting_power_avg: BigDecimal,
    pub voting_power_max: i64,
    pub voting_power_min: i64,
    pub total_shares_avg: BigDecimal,
    pub total_shares_max: BigDecimal,
    pub total_shares_min: BigDecimal,
    pub active_escrow_balance_avg: BigDecimal,
    pub active_escrow_balance_max: BigDecimal,
    pub active_escrow_balance_min: BigDecimal,
    pub commission_avg: BigDecimal,
    pub commission_max: BigDecimal,
    pub commission_min: BigDecimal,
    pub validated_sum: i64,
    pub not_validated_sum: i64,
    pub proposed_sum: i64,
    pub uptime_avg: BigDecimal,
    pub rewards_sum: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = balance_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BalanceSummaryDb {
    pub id: i64,
    pub time_interval: SummaryIntervalDb,
    pub time_bucket: NaiveDateTime,
    pub index_version: i64,
    pub address: String,
    pub escrow_address: String,
    pub total_rewards: BigDecimal,
    pub total_commission: BigDecimal,
    pub total_slashed: BigDecimal,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = balance_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BalanceSummaryInsertDb {
    pub time_interval: SummaryIntervalDb,
    pub time_bucket: NaiveDateTime,
    pub index_version: i64,
    pub address: String,
    pub escrow_address: String,
    pub total_rewards: BigDecimal,
    pub total_commission: BigDecimal,
    pub total_slashed: BigDecimal,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = balance_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BalanceSummaryUpdateDb {
    pub total_rewards: BigDecimal,
    pub total_commission: BigDecimal,
    pub total_slashed: BigDecimal,
}

/// Contiguous span of already-summarized buckets, from a raw window query.
#[derive(Debug, Clone, QueryableByName)]
pub struct ActivityPeriodRowDb {
    #[diesel(sql_type = Timestamp)]
    pub period_start: NaiveDateTime,
    #[diesel(sql_type = Timestamp)]
    pub period_end: NaiveDateTime,
}

impl From<ActivityPeriodRowDb> for ActivityPeriod {
    fn from(row: ActivityPeriodRowDb) -> Self {
        Self {
            period_start: row.period_start,
            period_end: row.period_end,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct RawBlockSummaryRowDb {
    #[diesel(sql_type = Timestamp)]
    pub time_bucket: NaiveDateTime,
    #[diesel(sql_type = Int8)]
    pub count: i64,
    #[diesel(sql_type = Numeric)]
    pub block_time_avg: BigDecimal,
}

#[derive(Debug, Clone, QueryableByName)]
pub struct RawValidatorSummaryRowDb {
    #[diesel(sql_type = Timestamp)]
    pub time_bucket: NaiveDateTime,
    #[diesel(sql_type = VarChar)]
    pub address: String,
    #[diesel(sql_type = Numeric)]
    pub voting_power_avg: BigDecimal,
    #[diesel(sql_type = Int8)]
    pub voting_power_max: i64,
    #[diesel(sql_type = Int8)]
    pub voting_power_min: i64,
    #[diesel(sql_type = Numeric)]
    pub total_shares_avg: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub total_shares_max: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub total_shares_min: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub active_escrow_balance_avg: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub active_escrow_balance_max: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub active_escrow_balance_min: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub commission_avg: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub commission_max: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub commission_min: BigDecimal,
    #[diesel(sql_type = Int8)]
    pub validated_sum: i64,
    #[diesel(sql_type = Int8)]
    pub not_validated_sum: i64,
    #[diesel(sql_type = Int8)]
    pub proposed_sum: i64,
    #[diesel(sql_type = Numeric)]
    pub uptime_avg: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub rewards_sum: BigDecimal,
}

#[derive(Debug, Clone, QueryableByName)]
pub struct RawBalanceSummaryRowDb {
    #[diesel(sql_type = Timestamp)]
    pub time_bucket: NaiveDateTime,
    #[diesel(sql_type = VarChar)]
    pub address: String,
    #[diesel(sql_type = VarChar)]
    pub escrow_address: String,
    #[diesel(sql_type = Numeric)]
    pub total_rewards: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub total_commission: BigDecimal,
    #[diesel(sql_type = Numeric)]
    pub total_slashed: BigDecimal,
}
