//! # Trainer Registry
//!
//! A record keeping service for trainers, the pokemon they catch and the
//! items they carry, with stat battles resolved against a remote catalog.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (trainers, pokemon, items, stats)
//! - **battle**: Stat-by-stat comparison of two creatures
//! - **sampler**: Uniform selection of distinct records
//! - **catalog**: Remote catalog client (name and stat lookups)
//! - **storage**: JSONL-backed record store
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod battle;
pub mod catalog;
pub mod config;
pub mod models;
pub mod sampler;
pub mod storage;

pub use models::*;
