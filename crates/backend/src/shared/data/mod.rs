pub mod db;
pub mod error;
pub mod reconcile;
pub mod recommend;
pub mod soft_delete;
pub mod sql_store;
pub mod store;

#[cfg(test)]
pub mod memory;
