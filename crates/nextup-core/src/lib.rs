//! # Nextup Core Library
//!
//! A small personal task scheduler. Tasks carry an optional repeat rule and
//! the library computes, on demand, the next date on which a recurring task
//! falls due.
//!
//! ## Core Modules
//!
//! - [`rule`]: Parsing of textual repeat rules (`y`, `d N`, `w ...`, `m ...`)
//! - [`recurrence`]: Pure next-occurrence calculation
//! - [`planner`]: Date normalization on write and rescheduling on completion
//! - [`repository`]: SQLite persistence of tasks
//! - [`db`]: Database connection and migrations
//! - [`models`]: Task types and boundary date helpers
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use nextup_core::{
//!     db, models::TaskInput, planner::Planner, repository::SqliteRepository,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("data/scheduler.db").await?;
//!     let planner = Planner::new(SqliteRepository::new(pool));
//!
//!     let task = planner
//!         .add_task(
//!             TaskInput {
//!                 title: "Pay rent".to_string(),
//!                 repeat: "m 1".to_string(),
//!                 ..Default::default()
//!             },
//!             Local::now().date_naive(),
//!         )
//!         .await?;
//!     println!("'{}' is due on {}", task.title, task.date);
//!
//!     Ok(())
//! }
//! ```
//!
//! The calculator can also be used on its own:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use nextup_core::recurrence::next_date_from_str;
//!
//! let anchor = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
//! let now = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
//! assert_eq!(
//!     next_date_from_str(anchor, now, "d 3").unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 22).unwrap()
//! );
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod planner;
pub mod recurrence;
pub mod repository;
pub mod rule;
