//! SigLab Core — engine, domain types, series validation, simulators.
//!
//! This crate contains the heart of the backtesting engine:
//! - Domain types (bars, signals, trades, portfolio state, equity points)
//! - Bar-series validator (the only constructor of simulator input)
//! - Buy-and-hold benchmark simulator
//! - Signal-driven simulator (long-only/flat state machine)
//! - Indicators and the heuristic signal generator
//! - Data providers (CSV import, Yahoo Finance, synthetic)

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod series;
pub mod signals;
