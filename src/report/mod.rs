// src/report/mod.rs
//! Score banding and result presentation

pub mod banding;
pub mod renderer;

pub use banding::ScoreBand;
pub use renderer::AnalysisReport;
