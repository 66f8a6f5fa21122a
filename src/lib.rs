pub mod app;
pub mod domain;
pub mod error;
pub mod exitcode;
pub mod integrations;
pub mod output;
pub mod storage;
