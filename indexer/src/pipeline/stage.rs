use std::collections::HashSet;

use futures::future;

use crate::pipeline::payload::Payload;
use crate::pipeline::task::{Task, TaskError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageName {
    Setup,
    Syncer,
    Fetcher,
    Parser,
    Sequencer,
    Aggregator,
    Persistor,
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageName::Setup => write!(f, "setup"),
            StageName::Syncer => write!(f, "syncer"),
            StageName::Fetcher => write!(f, "fetcher"),
            StageName::Parser => write!(f, "parser"),
            StageName::Sequencer => write!(f, "sequencer"),
            StageName::Aggregator => write!(f, "aggregator"),
            StageName::Persistor => write!(f, "persistor"),
        }
    }
}

enum Runner {
    /// Tasks run sequentially; the first failure aborts the stage.
    Sync,
    /// Tasks run concurrently against the same payload snapshot; the stage
    /// fails with the first declared task's error once all have returned.
    Async,
}

pub struct Stage {
    name: StageName,
    runner: Runner,
    tasks: Vec<Box<dyn Task>>,
}

impl Stage {
    pub fn sync_runner(name: StageName, tasks: Vec<Box<dyn Task>>) -> Self {
        Self {
            name,
            runner: Runner::Sync,
            tasks,
        }
    }

    pub fn async_runner(name: StageName, tasks: Vec<Box<dyn Task>>) -> Self {
        Self {
            name,
            runner: Runner::Async,
            tasks,
        }
    }

    pub fn name(&self) -> StageName {
        self.name
    }

    pub async fn run(
        &self,
        payload: &mut Payload,
        task_whitelist: &HashSet<String>,
    ) -> Result<(), TaskError> {
        let tasks: Vec<&Box<dyn Task>> = self
            .tasks
            .iter()
            .filter(|task| {
                let selected = task_whitelist.contains(task.name());
                if !selected {
                    tracing::debug!(
                        stage = %self.name,
                        task = task.name(),
                        "task not whitelisted, skipping"
                    );
                }
                selected
            })
            .collect();

        match self.runner {
            Runner::Sync => {
                for task in tasks {
                    let patch = task.run(payload).await?;
                    payload.apply(patch);
                }
            }
            Runner::Async => {
                let results = {
                    let snapshot: &Payload = payload;
                    future::join_all(
                        tasks.iter().map(|task| task.run(snapshot)),
                    )
                    .await
                };

                let mut patches = Vec::with_capacity(results.len());
                for result in results {
                    patches.push(result?);
                }
                for patch in patches {
                    payload.apply(patch);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use shared::block::HeightMeta;

    use super::*;
    use crate::pipeline::payload::{ParsedBlock, PayloadPatch};

    struct MetaTask;

    #[async_trait]
    impl Task for MetaTask {
        fn name(&self) -> &'static str {
            "MetaTask"
        }

        async fn run(
            &self,
            payload: &Payload,
        ) -> Result<PayloadPatch, TaskError> {
            Ok(PayloadPatch {
                height_meta: Some(HeightMeta {
                    height: payload.current_height,
                    time: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    chain_id: "chain-1".to_string(),
                }),
                ..Default::default()
            })
        }
    }

    struct ParsedBlockTask;

    #[async_trait]
    impl Task for ParsedBlockTask {
        fn name(&self) -> &'static str {
            "ParsedBlockTask"
        }

        async fn run(
            &self,
            _payload: &Payload,
        ) -> Result<PayloadPatch, TaskError> {
            Ok(PayloadPatch {
                parsed_block: Some(ParsedBlock {
                    transactions_count: 7,
                    proposer_entity_uid: String::new(),
                }),
                ..Default::default()
            })
        }
    }

    struct FailingTask;

    #[async_trait]
    impl Task for FailingTask {
        fn name(&self) -> &'static str {
            "FailingTask"
        }

        async fn run(
            &self,
            _payload: &Payload,
        ) -> Result<PayloadPatch, TaskError> {
            Err(TaskError::Fatal(anyhow::anyhow!("broken")))
        }
    }

    fn whitelist(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn async_runner_merges_patches_from_all_tasks() {
        let stage = Stage::async_runner(
            StageName::Parser,
            vec![Box::new(MetaTask), Box::new(ParsedBlockTask)],
        );
        let mut payload = Payload::new(5, 1, None);

        stage
            .run(
                &mut payload,
                &whitelist(&["MetaTask", "ParsedBlockTask"]),
            )
            .await
            .unwrap();

        assert_eq!(payload.chain_id, "chain-1");
        assert_eq!(payload.parsed_block.transactions_count, 7);
    }

    #[tokio::test]
    async fn async_runner_propagates_failure_after_all_tasks_return() {
        let stage = Stage::async_runner(
            StageName::Parser,
            vec![Box::new(FailingTask), Box::new(ParsedBlockTask)],
        );
        let mut payload = Payload::new(5, 1, None);

        let result = stage
            .run(
                &mut payload,
                &whitelist(&["FailingTask", "ParsedBlockTask"]),
            )
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn tasks_outside_the_whitelist_are_skipped() {
        let stage = Stage::sync_runner(
            StageName::Setup,
            vec![Box::new(FailingTask), Box::new(MetaTask)],
        );
        let mut payload = Payload::new(5, 1, None);

        stage
            .run(&mut payload, &whitelist(&["MetaTask"]))
            .await
            .unwrap();

        assert_eq!(payload.chain_id, "chain-1");
    }
}
