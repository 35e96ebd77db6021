//! Screening analysis algorithms
//!
//! Availability detection, per-metric cohort aggregation, the
//! population-level analyzer and the individual profiler.

pub mod aggregate;
pub mod availability;
pub mod individual;
pub mod population;

pub use aggregate::{MetricSummary, summarize_metric};
pub use availability::MetricAvailability;
pub use individual::{IndividualProfile, profile_individual};
pub use population::{
    AgeDistribution, GenderBreakdown, MetricReport, PopulationReport, UrineSummary,
    analyze_population,
};
