pub mod config;
pub mod ledger;
pub mod observability;
pub mod publish;
pub mod run;
pub mod select;
pub mod store;
