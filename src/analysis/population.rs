//! Population-level screening analysis
//!
//! Orchestrates availability detection and per-metric aggregation
//! across a whole record sequence, adding the demographic aggregates
//! (gender distribution, binned age distribution). The composite
//! result is what the company report renderer consumes.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::analysis::aggregate::{MetricSummary, summarize_metric};
use crate::analysis::availability::MetricAvailability;
use crate::classify::{
    classify_blood_pressure, classify_bmi, classify_cholesterol, classify_glucose, classify_urine,
};
use crate::models::{
    AgeGroup, BmiCategory, BpCategory, CholesterolCategory, Gender, GlucoseCategory,
    ScreeningRecord, UrineResult,
};
use crate::utils::{mean, percentage, round2};

/// Analysis outcome for one metric: either the aggregate tables or an
/// explicit marker that the dataset had no usable data for it
///
/// Renderers must branch on the variant; an absent metric never
/// surfaces as zeroed tables. When serialized inside a
/// [`PopulationReport`], a `NotAvailable` metric produces no key at
/// all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricReport<T> {
    /// The metric had valid data and was aggregated
    Available(T),
    /// No record carried valid data for the metric
    NotAvailable,
}

impl<T> MetricReport<T> {
    /// Whether the metric was analyzed
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Whether the metric was skipped for lack of data
    #[must_use]
    pub const fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }

    /// The aggregate payload, when available
    #[must_use]
    pub const fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(summary) => Some(summary),
            Self::NotAvailable => None,
        }
    }
}

/// One gender's share of the screened population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderBreakdown {
    /// Number of staff of this gender
    pub count: usize,
    /// Percentage of the full population, 2 decimals
    pub pct_of_total: f64,
}

/// Binned age distribution for the population
///
/// The overall tables are zero-filled across all six bins and use the
/// full population as denominator; the per-gender rows are sparse and
/// normalized against each gender's own binned count. Ages above 70 or
/// missing fall outside every bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    /// Age bin to count, all six bins present
    pub distribution: BTreeMap<AgeGroup, usize>,
    /// Age bin to percentage of the full population
    pub distribution_pct: BTreeMap<AgeGroup, f64>,
    /// Gender to age bin to count, observed bins only
    pub by_gender: BTreeMap<Gender, BTreeMap<AgeGroup, usize>>,
    /// Gender to age bin to percentage of that gender's binned count
    pub by_gender_pct: BTreeMap<Gender, BTreeMap<AgeGroup, f64>>,
    /// Mean age per gender over records with a known age, 2 decimals
    pub avg_age_by_gender: BTreeMap<Gender, f64>,
}

/// Aggregates for the two qualitative urine sub-tests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrineSummary {
    /// Urine glucose aggregate
    pub glucose: MetricSummary<UrineResult>,
    /// Urine protein aggregate
    pub protein: MetricSummary<UrineResult>,
}

/// Composite population analysis result for one company dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationReport {
    /// Cohort label for the report heading
    pub company_name: String,
    /// Total number of records, including ones with missing metrics
    pub total_staff: usize,
    /// Gender to count and percentage of total
    pub gender_distribution: BTreeMap<Gender, GenderBreakdown>,
    /// Binned age demographics
    pub age_distribution: AgeDistribution,
    /// Blood pressure aggregate, when available
    #[serde(skip_serializing_if = "MetricReport::is_not_available")]
    pub blood_pressure: MetricReport<MetricSummary<BpCategory>>,
    /// Blood glucose aggregate, when available
    #[serde(skip_serializing_if = "MetricReport::is_not_available")]
    pub blood_sugar: MetricReport<MetricSummary<GlucoseCategory>>,
    /// Cholesterol aggregate, when available
    #[serde(skip_serializing_if = "MetricReport::is_not_available")]
    pub cholesterol: MetricReport<MetricSummary<CholesterolCategory>>,
    /// BMI aggregate, when available
    #[serde(skip_serializing_if = "MetricReport::is_not_available")]
    pub bmi: MetricReport<MetricSummary<BmiCategory>>,
    /// Urine panel aggregate, when available
    #[serde(skip_serializing_if = "MetricReport::is_not_available")]
    pub urine: MetricReport<UrineSummary>,
}

/// Analyze a company's screening records
///
/// Every metric with at least one valid record is aggregated over its
/// own valid subset; metrics without any valid data come back as
/// [`MetricReport::NotAvailable`]. Demographic tables always use the
/// full population as denominator, which intentionally differs from
/// the per-metric valid-subset denominators.
#[must_use]
pub fn analyze_population(records: &[ScreeningRecord], company_name: &str) -> PopulationReport {
    let total_staff = records.len();
    info!("Analyzing screening data for {company_name}: {total_staff} records");

    let availability = MetricAvailability::detect(records);
    debug!("Metric availability: {availability:?}");

    let blood_pressure = if availability.blood_pressure {
        let subset: Vec<&ScreeningRecord> = records
            .iter()
            .filter(|r| r.has_blood_pressure())
            .collect();
        MetricReport::Available(summarize_metric(&subset, |r| match (r.systolic, r.diastolic) {
            (Some(systolic), Some(diastolic)) => {
                Some(classify_blood_pressure(systolic, diastolic))
            }
            _ => None,
        }))
    } else {
        MetricReport::NotAvailable
    };

    let blood_sugar = if availability.blood_glucose {
        let subset: Vec<&ScreeningRecord> =
            records.iter().filter(|r| r.blood_glucose.is_some()).collect();
        MetricReport::Available(summarize_metric(&subset, |r| {
            r.blood_glucose.map(classify_glucose)
        }))
    } else {
        MetricReport::NotAvailable
    };

    let cholesterol = if availability.cholesterol {
        let subset: Vec<&ScreeningRecord> =
            records.iter().filter(|r| r.cholesterol.is_some()).collect();
        MetricReport::Available(summarize_metric(&subset, |r| {
            r.cholesterol.map(classify_cholesterol)
        }))
    } else {
        MetricReport::NotAvailable
    };

    let bmi = if availability.bmi {
        let subset: Vec<&ScreeningRecord> = records.iter().filter(|r| r.bmi.is_some()).collect();
        MetricReport::Available(summarize_metric(&subset, |r| r.bmi.map(classify_bmi)))
    } else {
        MetricReport::NotAvailable
    };

    let urine = if availability.urine {
        let subset: Vec<&ScreeningRecord> =
            records.iter().filter(|r| r.has_urine_panel()).collect();
        let glucose = summarize_metric(&subset, |r| {
            parse_urine_logged(r.urine_glucose.as_deref(), "glucose", &r.enrollee_id)
        });
        let protein = summarize_metric(&subset, |r| {
            parse_urine_logged(r.urine_protein.as_deref(), "protein", &r.enrollee_id)
        });
        MetricReport::Available(UrineSummary { glucose, protein })
    } else {
        MetricReport::NotAvailable
    };

    PopulationReport {
        company_name: company_name.to_string(),
        total_staff,
        gender_distribution: gender_distribution(records, total_staff),
        age_distribution: age_distribution(records, total_staff),
        blood_pressure,
        blood_sugar,
        cholesterol,
        bmi,
        urine,
    }
}

fn parse_urine_logged(
    raw: Option<&str>,
    sub_test: &str,
    enrollee_id: &str,
) -> Option<UrineResult> {
    let raw = raw?;
    let parsed = classify_urine(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        warn!(
            "Unrecognized urine {sub_test} result '{}' for enrollee {enrollee_id}, excluding record",
            raw.trim()
        );
    }
    parsed
}

fn gender_distribution(
    records: &[ScreeningRecord],
    total_staff: usize,
) -> BTreeMap<Gender, GenderBreakdown> {
    let mut counts: BTreeMap<Gender, usize> = BTreeMap::new();
    for record in records {
        if record.gender != Gender::Unknown {
            *counts.entry(record.gender).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(gender, count)| {
            (
                gender,
                GenderBreakdown {
                    count,
                    // Full-population denominator, unlike metric tables
                    pct_of_total: percentage(count, total_staff),
                },
            )
        })
        .collect()
}

fn age_distribution(records: &[ScreeningRecord], total_staff: usize) -> AgeDistribution {
    let mut distribution: BTreeMap<AgeGroup, usize> =
        AgeGroup::ALL.iter().map(|bin| (*bin, 0)).collect();
    let mut by_gender: BTreeMap<Gender, BTreeMap<AgeGroup, usize>> = BTreeMap::new();
    let mut ages_by_gender: BTreeMap<Gender, Vec<f64>> = BTreeMap::new();

    for record in records {
        let Some(age) = record.age else { continue };
        if record.gender != Gender::Unknown {
            ages_by_gender
                .entry(record.gender)
                .or_default()
                .push(f64::from(age));
        }
        let Some(bin) = AgeGroup::from_age(age) else {
            continue;
        };
        if let Some(count) = distribution.get_mut(&bin) {
            *count += 1;
        }
        if record.gender != Gender::Unknown {
            *by_gender
                .entry(record.gender)
                .or_default()
                .entry(bin)
                .or_insert(0) += 1;
        }
    }

    let distribution_pct = distribution
        .iter()
        .map(|(bin, count)| (*bin, percentage(*count, total_staff)))
        .collect();

    let by_gender_pct = by_gender
        .iter()
        .map(|(gender, row)| {
            let row_total: usize = row.values().sum();
            let row_pct = row
                .iter()
                .map(|(bin, count)| (*bin, percentage(*count, row_total)))
                .collect();
            (*gender, row_pct)
        })
        .collect();

    let avg_age_by_gender = ages_by_gender
        .iter()
        .filter_map(|(gender, ages)| mean(ages).map(|avg| (*gender, round2(avg))))
        .collect();

    AgeDistribution {
        distribution,
        distribution_pct,
        by_gender,
        by_gender_pct,
        avg_age_by_gender,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: &str,
        gender: Gender,
        age: u32,
        bp: Option<(f64, f64)>,
    ) -> ScreeningRecord {
        let mut record = ScreeningRecord::new(id.to_string(), gender, Some(age));
        if let Some((systolic, diastolic)) = bp {
            record.systolic = Some(systolic);
            record.diastolic = Some(diastolic);
        }
        record
    }

    #[test]
    fn test_gender_distribution_uses_full_population_denominator() {
        // Four records, one with unknown gender and one BP-less: gender
        // percentages still divide by all four.
        let records = vec![
            record("A", Gender::Male, 35, Some((120.0, 80.0))),
            record("B", Gender::Male, 45, None),
            record("C", Gender::Female, 40, Some((120.0, 80.0))),
            record("D", Gender::Unknown, 50, Some((120.0, 80.0))),
        ];
        let report = analyze_population(&records, "ACME");

        assert_eq!(report.total_staff, 4);
        assert_eq!(report.gender_distribution[&Gender::Male].count, 2);
        assert_eq!(report.gender_distribution[&Gender::Male].pct_of_total, 50.0);
        assert_eq!(report.gender_distribution[&Gender::Female].pct_of_total, 25.0);
        assert!(!report.gender_distribution.contains_key(&Gender::Unknown));

        // The BP table divides by its own valid subset of three instead
        let bp = report.blood_pressure.as_available().unwrap();
        assert_eq!(bp.distribution_pct[&BpCategory::Normal], 100.0);
        assert_eq!(bp.classified_count(), 3);
    }

    #[test]
    fn test_age_bins_are_zero_filled_overall_only() {
        let records = vec![
            record("A", Gender::Male, 35, None),
            record("B", Gender::Female, 62, None),
            record("C", Gender::Female, 75, None), // outside every bin
        ];
        let report = analyze_population(&records, "ACME");
        let ages = &report.age_distribution;

        assert_eq!(ages.distribution.len(), AgeGroup::ALL.len());
        assert_eq!(ages.distribution[&AgeGroup::From31To40], 1);
        assert_eq!(ages.distribution[&AgeGroup::UpTo20], 0);
        assert_eq!(ages.distribution_pct[&AgeGroup::From31To40], 33.33);

        // Per-gender rows stay sparse
        assert_eq!(ages.by_gender[&Gender::Female].len(), 1);
        assert_eq!(ages.by_gender_pct[&Gender::Female][&AgeGroup::From61To70], 100.0);

        // Mean age still counts the unbinned 75-year-old
        assert_eq!(ages.avg_age_by_gender[&Gender::Female], 68.5);
    }

    #[test]
    fn test_unavailable_metric_is_marked_not_available() {
        let records = vec![record("A", Gender::Male, 35, Some((120.0, 80.0)))];
        let report = analyze_population(&records, "ACME");

        assert!(report.blood_pressure.is_available());
        assert!(report.cholesterol.is_not_available());
        assert!(report.urine.is_not_available());
        assert_eq!(report.cholesterol.as_available(), None);
    }

    #[test]
    fn test_empty_dataset_produces_empty_report() {
        let report = analyze_population(&[], "ACME");
        assert_eq!(report.total_staff, 0);
        assert!(report.gender_distribution.is_empty());
        assert!(report.blood_pressure.is_not_available());
        assert!(report.bmi.is_not_available());
    }
}
