pub mod client;
pub mod http;

pub use client::{
    BlockRpc, ChainRpc, Client, EventRpc, StateRpc, TransactionRpc,
    ValidatorRpc,
};
pub use http::HttpClient;
