use chrono::NaiveDateTime;

use crate::block::BlockHeight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Index,
    SequentialReindex,
    ParallelReindex,
}

impl ReportKind {
    pub fn is_reindex(&self) -> bool {
        matches!(
            self,
            ReportKind::SequentialReindex | ReportKind::ParallelReindex
        )
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Index => write!(f, "index"),
            ReportKind::SequentialReindex => write!(f, "sequential_reindex"),
            ReportKind::ParallelReindex => write!(f, "parallel_reindex"),
        }
    }
}

/// Run record covering a height range.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i64,
    pub kind: ReportKind,
    pub index_version: i64,
    pub start_height: BlockHeight,
    pub end_height: BlockHeight,
    pub success_count: Option<i64>,
    pub error_count: Option<i64>,
    pub error_msg: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
}

impl Report {
    pub fn complete(
        &mut self,
        success_count: i64,
        error_count: i64,
        error_msg: Option<String>,
        now: NaiveDateTime,
    ) {
        self.success_count = Some(success_count);
        self.error_count = Some(error_count);
        self.error_msg = error_msg;
        self.completed_at = Some(now);
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
