pub mod create;
pub mod delete;
pub mod drop;
pub mod executer;
pub mod filter;
pub mod help_functions;
pub mod insert;
pub mod join;
pub mod select;
pub mod update;
