use shared::report::{Report, ReportKind};
use thiserror::Error;

#[derive(Error, Debug)]
#[error(
    "there is already a reindexing in process [kind={existing}] (use --force to override it)"
)]
pub struct ReindexKindConflict {
    pub existing: ReportKind,
}

#[derive(Debug)]
pub enum ReindexDecision {
    /// An open report of the requested kind exists; continue it.
    Resume(Report),
    /// No open reindex report; a fresh one must be created.
    Create,
}

/// Decides what to do with an outstanding reindex report. At most one open
/// reindex report may exist per index version, so a kind mismatch is a
/// conflict unless the caller force-deleted it beforehand.
pub fn resolve_reindex_report(
    existing: Option<Report>,
    requested: ReportKind,
) -> Result<ReindexDecision, ReindexKindConflict> {
    match existing {
        None => Ok(ReindexDecision::Create),
        Some(report) if report.kind == requested => {
            Ok(ReindexDecision::Resume(report))
        }
        Some(report) => Err(ReindexKindConflict {
            existing: report.kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_report(kind: ReportKind) -> Report {
        Report {
            id: 11,
            kind,
            index_version: 2,
            start_height: 10,
            end_height: 20,
            success_count: None,
            error_count: None,
            error_msg: None,
            completed_at: None,
        }
    }

    #[test]
    fn different_kind_conflicts() {
        let existing = open_report(ReportKind::SequentialReindex);

        let result = resolve_reindex_report(
            Some(existing),
            ReportKind::ParallelReindex,
        );

        let err = result.unwrap_err();
        assert_eq!(err.existing, ReportKind::SequentialReindex);
    }

    #[test]
    fn matching_kind_resumes() {
        let existing = open_report(ReportKind::SequentialReindex);

        let decision = resolve_reindex_report(
            Some(existing.clone()),
            ReportKind::SequentialReindex,
        )
        .unwrap();

        match decision {
            ReindexDecision::Resume(report) => assert_eq!(report, existing),
            other => panic!("expected resume, got {:?}", other),
        }
    }

    #[test]
    fn absent_report_creates_anew() {
        let decision =
            resolve_reindex_report(None, ReportKind::ParallelReindex)
                .unwrap();

        assert!(matches!(decision, ReindexDecision::Create));
    }
}
