pub mod purge;
pub mod summarize;
