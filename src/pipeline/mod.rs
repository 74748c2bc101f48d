//! Experiment pipeline
//!
//! This module provides composable pipelines for:
//! - Playing two strategies against each other over many games
//! - Running batches of experiments
//! - Recording observations while games are played

pub mod experiment;
pub mod observers;
pub mod suite;

pub use experiment::{Experiment, ExperimentConfig, ExperimentResult, GameRecord, Opening};
// Re-export observer implementations (adapters)
pub use observers::{
    GameEvent, JsonlObserver, MetricsObserver, MetricsSummary, MoveEvent, ProgressObserver,
    SharedObserver,
};
pub use suite::{SUITE_MAX_DEPTH, load_suite, run_suite, standard_suite};

pub use crate::ports::Observer;
