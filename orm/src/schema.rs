pub mod sql_types {
    #[derive(
        diesel::query_builder::QueryId,
        std::fmt::Debug,
        diesel::sql_types::SqlType,
    )]
    #[diesel(postgres_type(name = "syncable_kind"))]
    pub struct SyncableKind;

    #[derive(
        diesel::query_builder::QueryId,
        std::fmt::Debug,
        diesel::sql_types::SqlType,
    )]
    #[diesel(postgres_type(name = "report_kind"))]
    pub struct ReportKind;

    #[derive(
        diesel::query_builder::QueryId,
        std::fmt::Debug,
        diesel::sql_types::SqlType,
    )]
    #[diesel(postgres_type(name = "summary_interval"))]
    pub struct SummaryInterval;

    #[derive(
        diesel::query_builder::QueryId,
        std::fmt::Debug,
        diesel::sql_types::SqlType,
    )]
    #[diesel(postgres_type(name = "balance_event_kind"))]
    pub struct BalanceEventKind;

    #[derive(
        diesel::query_builder::QueryId,
        std::fmt::Debug,
        diesel::sql_types::SqlType,
    )]
    #[diesel(postgres_type(name = "system_event_kind"))]
    pub struct SystemEventKind;
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::SyncableKind;

    syncables (id) {
        id -> Int8,
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        kind -> SyncableKind,
        data -> Nullable<Jsonb>,
        index_version -> Int8,
        report_id -> Nullable<Int8>,
        processed_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::ReportKind;

    reports (id) {
        id -> Int8,
        kind -> ReportKind,
        index_version -> Int8,
        start_height -> Int8,
        end_height -> Int8,
        success_count -> Nullable<Int8>,
        error_count -> Nullable<Int8>,
        error_msg -> Nullable<Text>,
        completed_at -> Nullable<Timestamp>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    block_sequences (height) {
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        transactions_count -> Int8,
        proposer_entity_uid -> Varchar,
    }
}

diesel::table! {
    transaction_sequences (id) {
        id -> Int8,
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        hash -> Varchar,
        public_key -> Varchar,
        nonce -> Int8,
        method -> Varchar,
        fee -> Numeric,
        gas_limit -> Int8,
        gas_price -> Numeric,
    }
}

diesel::table! {
    validator_sequences (id) {
        id -> Int8,
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        entity_uid -> Varchar,
        node_uid -> Varchar,
        consensus_uid -> Varchar,
        address -> Varchar,
        voting_power -> Int8,
        total_shares -> Numeric,
        commission -> Numeric,
        active_escrow_balance -> Numeric,
        proposed -> Bool,
        precommit_validated -> Nullable<Bool>,
        precommit_block_id_flag -> Int8,
        precommit_index -> Int8,
        rewards -> Numeric,
    }
}

diesel::table! {
    staking_sequences (height) {
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        total_supply -> Numeric,
        common_pool -> Numeric,
    }
}

diesel::table! {
    delegation_sequences (id) {
        id -> Int8,
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        validator_uid -> Varchar,
        delegator_uid -> Varchar,
        shares -> Numeric,
    }
}

diesel::table! {
    debonding_delegation_sequences (id) {
        id -> Int8,
        chain_id -> Varchar,
        height -> Int8,
        time -> Timestamp,
        validator_uid -> Varchar,
        delegator_uid -> Varchar,
        shares -> Numeric,
        debond_end -> Int8,
    }
}

diesel::table! {
    account_aggregates (public_key) {
        public_key -> Varchar,
        recent_general_balance -> Numeric,
        recent_escrow_active_balance -> Numeric,
        recent_escrow_debonding_balance -> Numeric,
        first_height -> Int8,
        first_time -> Timestamp,
        recent_height -> Int8,
        recent_time -> Timestamp,
    }
}

diesel::table! {
    validator_aggregates (entity_uid) {
        entity_uid -> Varchar,
        recent_address -> Varchar,
        recent_tendermint_address -> Varchar,
        recent_voting_power -> Int8,
        recent_total_shares -> Numeric,
        first_height -> Int8,
        first_time -> Timestamp,
        recent_height -> Int8,
        recent_time -> Timestamp,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::SummaryInterval;

    block_summaries (id) {
        id -> Int8,
        time_interval -> SummaryInterval,
        time_bucket -> Timestamp,
        index_version -> Int8,
        count -> Int8,
        block_time_avg -> Numeric,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::SummaryInterval;

    validator_summaries (id) {
        id -> Int8,
        time_interval -> SummaryInterval,
        time_bucket -> Timestamp,
        index_version -> Int8,
        address -> Varchar,
        voting_power_avg -> Numeric,
        voting_power_max -> Int8,
        voting_power_min -> Int8,
        total_shares_avg -> Numeric,
        total_shares_max -> Numeric,
        total_shares_min -> Numeric,
        active_escrow_balance_avg -> Numeric,
        active_escrow_balance_max -> Numeric,
        active_escrow_balance_min -> Numeric,
        commission_avg -> Numeric,
        commission_max -> Numeric,
        commission_min -> Numeric,
        validated_sum -> Int8,
        not_validated_sum -> Int8,
        proposed_sum -> Int8,
        uptime_avg -> Numeric,
        rewards_sum -> Numeric,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::SummaryInterval;

    balance_summaries (id) {
        id -> Int8,
        time_interval -> SummaryInterval,
        time_bucket -> Timestamp,
        index_version -> Int8,
        address -> Varchar,
        escrow_address -> Varchar,
        total_rewards -> Numeric,
        total_commission -> Numeric,
        total_slashed -> Numeric,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::BalanceEventKind;

    balance_events (id) {
        id -> Int8,
        height -> Int8,
        time -> Timestamp,
        address -> Varchar,
        escrow_address -> Varchar,
        kind -> BalanceEventKind,
        amount -> Numeric,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::SystemEventKind;

    system_events (id) {
        id -> Int8,
        height -> Int8,
        time -> Timestamp,
        actor -> Varchar,
        kind -> SystemEventKind,
        data -> Jsonb,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    syncables,
    reports,
    block_sequences,
    transaction_sequences,
    validator_sequences,
    staking_sequences,
    delegation_sequences,
    debonding_delegation_sequences,
    account_aggregates,
    validator_aggregates,
    block_summaries,
    validator_summaries,
    balance_summaries,
    balance_events,
    system_events,
);
