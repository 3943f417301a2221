pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod order;
pub mod retail;
pub mod session;
pub mod storage;
