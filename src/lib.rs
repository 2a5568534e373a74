pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod filter;
pub mod models;
pub mod report;
pub mod voice;
