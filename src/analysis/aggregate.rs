//! Cohort aggregation for one metric
//!
//! Classifies every record of a pre-filtered valid subset and builds
//! the per-metric aggregate tables: category counts, percentage
//! distribution, gender-conditioned counts and row-normalized
//! percentages, and mean age per category.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::models::{Gender, ScreeningRecord};
use crate::utils::{mean, percentage, round2};

/// Aggregate result for one metric over a cohort
///
/// Categories with zero observed records are omitted from every map;
/// consumers must tolerate missing keys. Percentage denominators are
/// the metric's own classified-record count (overall) or the gender's
/// own classified-record count (per gender row), never the full
/// population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary<C: Ord + Serialize> {
    /// Category to observed-record count
    pub distribution: BTreeMap<C, usize>,
    /// Category to percentage of the classified subset, 2 decimals
    pub distribution_pct: BTreeMap<C, f64>,
    /// Gender to category to count; unknown-gender records excluded
    pub by_gender: BTreeMap<Gender, BTreeMap<C, usize>>,
    /// Gender to category to percentage of that gender's row total
    pub by_gender_pct: BTreeMap<Gender, BTreeMap<C, f64>>,
    /// Category to mean age of its records, 2 decimals
    pub avg_age: BTreeMap<C, f64>,
}

impl<C: Ord + Serialize> MetricSummary<C> {
    /// Number of records that classified into any category
    #[must_use]
    pub fn classified_count(&self) -> usize {
        self.distribution.values().sum()
    }
}

/// Aggregate one metric across the records with valid data for it
///
/// The classifier closure receives each record and returns its
/// category, or `None` when the record's value turns out to be
/// unusable (e.g. an unrecognized qualitative label); such records
/// drop out of the tallies and of the percentage denominator.
#[must_use]
pub fn summarize_metric<C, F>(records: &[&ScreeningRecord], classify: F) -> MetricSummary<C>
where
    C: Copy + Ord + std::hash::Hash + Serialize,
    F: Fn(&ScreeningRecord) -> Option<C>,
{
    let classified: Vec<(&ScreeningRecord, C)> = records
        .iter()
        .filter_map(|&record| classify(record).map(|category| (record, category)))
        .collect();
    let total = classified.len();

    let distribution: BTreeMap<C, usize> = classified
        .iter()
        .map(|(_, category)| *category)
        .counts()
        .into_iter()
        .collect();

    let distribution_pct = distribution
        .iter()
        .map(|(category, count)| (*category, percentage(*count, total)))
        .collect();

    let mut by_gender: BTreeMap<Gender, BTreeMap<C, usize>> = BTreeMap::new();
    for (record, category) in &classified {
        if record.gender == Gender::Unknown {
            continue;
        }
        *by_gender
            .entry(record.gender)
            .or_default()
            .entry(*category)
            .or_insert(0) += 1;
    }

    let by_gender_pct = by_gender
        .iter()
        .map(|(gender, row)| {
            let row_total: usize = row.values().sum();
            let row_pct = row
                .iter()
                .map(|(category, count)| (*category, percentage(*count, row_total)))
                .collect();
            (*gender, row_pct)
        })
        .collect();

    let mut ages_by_category: BTreeMap<C, Vec<f64>> = BTreeMap::new();
    for (record, category) in &classified {
        if let Some(age) = record.age {
            ages_by_category
                .entry(*category)
                .or_default()
                .push(f64::from(age));
        }
    }
    let avg_age = ages_by_category
        .iter()
        .filter_map(|(category, ages)| mean(ages).map(|avg| (*category, round2(avg))))
        .collect();

    MetricSummary {
        distribution,
        distribution_pct,
        by_gender,
        by_gender_pct,
        avg_age,
    }
}
