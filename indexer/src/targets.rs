use std::collections::HashSet;
use std::fs;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TargetsError {
    #[error("version {0} not found")]
    UnknownVersion(i64),
    #[error("target id {0} does not exist")]
    UnknownTarget(i64),
}

#[derive(Debug, Deserialize)]
struct TargetsManifest {
    #[allow(dead_code)]
    version: i64,
    versions: Vec<VersionCfg>,
    shared_tasks: Vec<String>,
    available_targets: Vec<TargetCfg>,
}

#[derive(Debug, Deserialize)]
struct VersionCfg {
    id: i64,
    targets: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct TargetCfg {
    id: i64,
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    desc: String,
    tasks: Vec<String>,
}

/// Versioned task/target manifest. Answers which tasks must run for a given
/// output version or target set.
pub struct TargetCatalog {
    cfg: TargetsManifest,
}

impl TargetCatalog {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path).with_context(|| {
            format!("Failed to read targets manifest at {}", path)
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        let cfg: TargetsManifest = serde_json::from_str(data)
            .context("Failed to parse targets manifest")?;
        anyhow::ensure!(
            !cfg.versions.is_empty(),
            "targets manifest declares no versions"
        );
        Ok(Self { cfg })
    }

    /// Id of the last-declared version.
    pub fn current_version_id(&self) -> i64 {
        self.cfg.versions[self.cfg.versions.len() - 1].id
    }

    /// Shared tasks followed by every available target's tasks, de-duplicated
    /// preserving first occurrence.
    pub fn all_tasks(&self) -> Vec<String> {
        let mut tasks = self.cfg.shared_tasks.clone();
        for target in &self.cfg.available_targets {
            tasks.extend(target.tasks.iter().cloned());
        }
        unique(tasks)
    }

    pub fn tasks_for_version(
        &self,
        version_id: i64,
    ) -> Result<Vec<String>, TargetsError> {
        let version = self
            .cfg
            .versions
            .iter()
            .find(|v| v.id == version_id)
            .ok_or(TargetsError::UnknownVersion(version_id))?;

        self.tasks_for_targets(&version.targets)
    }

    pub fn tasks_for_targets(
        &self,
        target_ids: &[i64],
    ) -> Result<Vec<String>, TargetsError> {
        let mut tasks = self.cfg.shared_tasks.clone();
        for target_id in target_ids {
            tasks.extend(self.target_tasks(*target_id)?.iter().cloned());
        }
        Ok(unique(tasks))
    }

    fn target_tasks(&self, target_id: i64) -> Result<&[String], TargetsError> {
        self.cfg
            .available_targets
            .iter()
            .find(|t| t.id == target_id)
            .map(|t| t.tasks.as_slice())
            .ok_or(TargetsError::UnknownTarget(target_id))
    }
}

fn unique(tasks: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .into_iter()
        .filter(|task| seen.insert(task.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(
        shared_tasks: &[&str],
        targets: &[(i64, &[&str])],
        versions: &[(i64, &[i64])],
    ) -> TargetCatalog {
        let targets = targets
            .iter()
            .map(|(id, tasks)| {
                serde_json::json!({
                    "id": id,
                    "name": format!("target_{}", id),
                    "desc": "",
                    "tasks": tasks,
                })
            })
            .collect::<Vec<_>>();
        let versions = versions
            .iter()
            .map(|(id, targets)| {
                serde_json::json!({ "id": id, "targets": targets })
            })
            .collect::<Vec<_>>();

        let data = serde_json::json!({
            "version": versions.len(),
            "versions": versions,
            "shared_tasks": shared_tasks,
            "available_targets": targets,
        });

        TargetCatalog::from_json(&data.to_string()).unwrap()
    }

    #[test]
    fn all_tasks_prepends_shared_and_dedups() {
        let catalog = manifest(
            &["S1", "S2"],
            &[
                (1, &["T1", "T2"]),
                (2, &["T1", "T2", "T3", "T4", "T5"]),
            ],
            &[(1, &[1, 2])],
        );

        assert_eq!(
            catalog.all_tasks(),
            vec!["S1", "S2", "T1", "T2", "T3", "T4", "T5"]
        );
    }

    #[test]
    fn tasks_for_version_fails_on_unknown_version() {
        let catalog = manifest(
            &[],
            &[(1, &["T1"])],
            &[(1, &[1]), (2, &[1])],
        );

        assert_eq!(
            catalog.tasks_for_version(40),
            Err(TargetsError::UnknownVersion(40))
        );
    }

    #[test]
    fn tasks_for_targets_fails_on_unknown_target() {
        let catalog = manifest(&[], &[(1, &["T1"])], &[(1, &[1])]);

        assert_eq!(
            catalog.tasks_for_targets(&[1, 9]),
            Err(TargetsError::UnknownTarget(9))
        );
    }

    #[test]
    fn current_version_is_the_last_declared() {
        let catalog = manifest(
            &[],
            &[(1, &["T1"])],
            &[(1, &[1]), (2, &[1]), (5, &[1])],
        );

        assert_eq!(catalog.current_version_id(), 5);
    }

    #[test]
    fn order_is_stable_across_calls() {
        let catalog = manifest(
            &["S1"],
            &[(1, &["T2", "T1"]), (2, &["T1", "T3"])],
            &[(1, &[1, 2])],
        );

        assert_eq!(catalog.all_tasks(), catalog.all_tasks());
        assert_eq!(catalog.all_tasks(), vec!["S1", "T2", "T1", "T3"]);
    }
}
