//! PostgreSQL connectivity for the task service.
//!
//! Wraps SeaORM connection management behind a small API: pool
//! configuration loaded from the environment, connect helpers with retry,
//! migration running, health checks, and a generic [`BaseRepository`] for
//! entity CRUD.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "tasks_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
