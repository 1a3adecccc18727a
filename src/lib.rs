//! Aivisor - AI-crawler visit tracking service
//!
//! This library provides the core functionality for the Aivisor service:
//! classifying inbound User-Agent strings against a table of known AI
//! crawler patterns and persisting one visit record per recognized request.
//!
//! # Architecture
//! - `classifier`: User-Agent → bot label matching (the detection core)
//! - `repository`: storage backends and data access
//! - `api`: HTTP services (ingestion endpoint, health probe)
//! - `config`: configuration management
//! - `runtime`: server bootstrap
//! - `system`: logging and system utilities

pub mod api;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod repository;
pub mod runtime;
pub mod system;
