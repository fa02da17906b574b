use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use shared::report::{Report, ReportKind};

use crate::schema::reports;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    diesel_derive_enum::DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReportKind"]
pub enum ReportKindDb {
    Index,
    SequentialReindex,
    ParallelReindex,
}

impl From<ReportKind> for ReportKindDb {
    fn from(value: ReportKind) -> Self {
        match value {
            ReportKind::Index => Self::Index,
            ReportKind::SequentialReindex => Self::SequentialReindex,
            ReportKind::ParallelReindex => Self::ParallelReindex,
        }
    }
}

impl From<ReportKindDb> for ReportKind {
    fn from(value: ReportKindDb) -> Self {
        match value {
            ReportKindDb::Index => Self::Index,
            ReportKindDb::SequentialReindex => Self::SequentialReindex,
            ReportKindDb::ParallelReindex => Self::ParallelReindex,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReportDb {
    pub id: i64,
    pub kind: ReportKindDb,
    pub index_version: i64,
    pub start_height: i64,
    pub end_height: i64,
    pub success_count: Option<i64>,
    pub error_count: Option<i64>,
    pub error_msg: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReportInsertDb {
    pub kind: ReportKindDb,
    pub index_version: i64,
    pub start_height: i64,
    pub end_height: i64,
    pub created_at: NaiveDateTime,
}

impl From<ReportDb> for Report {
    fn from(db: ReportDb) -> Self {
        Self {
            id: db.id,
            kind: db.kind.into(),
            index_version: db.index_version,
            start_height: db.start_height,
            end_height: db.end_height,
            success_count: db.success_count,
            error_count: db.error_count,
            error_msg: db.error_msg,
            completed_at: db.completed_at,
        }
    }
}
