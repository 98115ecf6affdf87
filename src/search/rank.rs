use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::models::{AncestryEvaluation, ResultRecord};
use crate::search::ancestry::{self, AncestryFilter};

/// Order records for display.
///
/// Stable sort with strict tiers:
///   1. user-trained / user-uploaded / in-progress first, in input order
///   2. display AUC, descending
///   3. display R², descending
///   4. display name, ascending by root-locale collation (empty names last)
///
/// With a non-empty filter the display metrics come from the first
/// per-ancestry evaluation matching the filter, falling back to the
/// record's own metric and then to 0. NaN metrics count as missing.
pub fn rank(records: &[ResultRecord], active: &AncestryFilter) -> Vec<ResultRecord> {
    let collator = name_collator();
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| compare(a, b, active, collator.as_ref()));
    ranked
}

/// Root-locale collator: case and diacritics are secondary to base letters.
fn name_collator() -> Option<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|e| tracing::warn!("Name collator unavailable, using case-folded order: {e:?}"))
        .ok()
}

fn compare(
    a: &ResultRecord,
    b: &ResultRecord,
    active: &AncestryFilter,
    collator: Option<&Collator>,
) -> Ordering {
    let (a_user, b_user) = (a.source.is_user_authored(), b.source.is_user_authored());
    match (a_user, b_user) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    descending(display_auc(a, active), display_auc(b, active))
        .then_with(|| descending(display_r2(a, active), display_r2(b, active)))
        .then_with(|| compare_names(&a.name, &b.name, collator))
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// AUC used for ranking under the given ancestry context.
pub fn display_auc(record: &ResultRecord, active: &AncestryFilter) -> f64 {
    display_metric(record, active, |e| e.auc, record.auc)
}

/// R² used for ranking under the given ancestry context.
pub fn display_r2(record: &ResultRecord, active: &AncestryFilter) -> f64 {
    display_metric(record, active, |e| e.r2, record.r2)
}

fn display_metric(
    record: &ResultRecord,
    active: &AncestryFilter,
    metric: impl Fn(&AncestryEvaluation) -> Option<f64>,
    generic: Option<f64>,
) -> f64 {
    let per_ancestry = if active.is_empty() {
        None
    } else {
        record
            .evaluations
            .iter()
            .filter(|e| ancestry::matches(Some(e.ancestry.as_str()), active))
            .find_map(|e| metric(e).filter(|v| !v.is_nan()))
    };

    per_ancestry
        .or(generic.filter(|v| !v.is_nan()))
        .unwrap_or(0.0)
}

fn compare_names(a: &str, b: &str, collator: Option<&Collator>) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
        .then_with(|| a.cmp(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    fn catalog(id: &str, auc: Option<f64>, r2: Option<f64>) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            name: id.to_string(),
            source: SourceKind::Catalog,
            auc,
            r2,
            ..ResultRecord::default()
        }
    }

    fn ids(records: &[ResultRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn no_filter() -> AncestryFilter {
        AncestryFilter::default()
    }

    #[test]
    fn test_user_trained_beats_best_catalog_record() {
        let mut trained = catalog("trained", Some(0.1), None);
        trained.source = SourceKind::UserTrained;
        let mut best = catalog("best", Some(0.99), None);
        best.ancestry = Some("European".to_string());

        let ranked = rank(&[best, trained], &AncestryFilter::new(["EUR"]));
        assert_eq!(ids(&ranked), vec!["trained", "best"]);
    }

    #[test]
    fn test_user_authored_keep_input_order() {
        let mut a = catalog("uploaded", Some(0.5), None);
        a.source = SourceKind::UserUploaded;
        let mut b = catalog("pending", Some(0.9), None);
        b.source = SourceKind::InProgress;
        let mut c = catalog("trained", Some(0.7), None);
        c.source = SourceKind::UserTrained;

        let ranked = rank(&[a, b, c], &no_filter());
        assert_eq!(ids(&ranked), vec!["uploaded", "pending", "trained"]);
    }

    #[test]
    fn test_auc_descending_then_r2_then_name() {
        let records = vec![
            catalog("b", Some(0.8), Some(0.1)),
            catalog("a", Some(0.8), Some(0.1)),
            catalog("top", Some(0.9), None),
            catalog("c", Some(0.8), Some(0.3)),
        ];
        let ranked = rank(&records, &no_filter());
        assert_eq!(ids(&ranked), vec!["top", "c", "a", "b"]);
    }

    #[test]
    fn test_missing_metrics_default_to_zero() {
        let records = vec![
            catalog("none", None, None),
            catalog("low", Some(0.01), None),
        ];
        let ranked = rank(&records, &no_filter());
        assert_eq!(ids(&ranked), vec!["low", "none"]);
    }

    #[test]
    fn test_identical_records_keep_input_order() {
        let mut first = catalog("x", Some(0.7), Some(0.2));
        first.id = "first".to_string();
        let mut second = catalog("x", Some(0.7), Some(0.2));
        second.id = "second".to_string();

        let ranked = rank(&[first, second], &no_filter());
        assert_eq!(ids(&ranked), vec!["first", "second"]);
    }

    #[test]
    fn test_per_ancestry_evaluation_overrides_generic_auc() {
        let mut eval_backed = catalog("eval", Some(0.6), None);
        eval_backed.evaluations = vec![AncestryEvaluation {
            ancestry: "AFR".to_string(),
            auc: Some(0.85),
            r2: None,
        }];
        let generic = catalog("generic", Some(0.8), None);

        let afr = AncestryFilter::new(["AFR"]);
        assert_eq!(display_auc(&eval_backed, &afr), 0.85);
        assert_eq!(ids(&rank(&[generic.clone(), eval_backed.clone()], &afr)), vec!["eval", "generic"]);

        // Without a filter the generic metric is used.
        assert_eq!(ids(&rank(&[eval_backed, generic], &no_filter())), vec!["generic", "eval"]);
    }

    #[test]
    fn test_non_matching_evaluation_is_ignored() {
        let mut rec = catalog("r", Some(0.6), Some(0.05));
        rec.evaluations = vec![AncestryEvaluation {
            ancestry: "East Asian".to_string(),
            auc: Some(0.9),
            r2: Some(0.4),
        }];
        let eur = AncestryFilter::new(["EUR"]);
        assert_eq!(display_auc(&rec, &eur), 0.6);
        assert_eq!(display_r2(&rec, &eur), 0.05);
    }

    #[test]
    fn test_evaluation_without_metric_falls_through() {
        let mut rec = catalog("r", None, Some(0.2));
        rec.evaluations = vec![
            AncestryEvaluation {
                ancestry: "European".to_string(),
                auc: Some(0.7),
                r2: None,
            },
            AncestryEvaluation {
                ancestry: "EUR (UK Biobank)".to_string(),
                auc: None,
                r2: Some(0.11),
            },
        ];
        let eur = AncestryFilter::new(["EUR"]);
        assert_eq!(display_auc(&rec, &eur), 0.7);
        assert_eq!(display_r2(&rec, &eur), 0.11);
    }

    #[test]
    fn test_names_case_folded_and_empty_last() {
        let records = vec![
            catalog("", Some(0.5), None),
            catalog("beta", Some(0.5), None),
            catalog("Alpha", Some(0.5), None),
        ];
        let ranked = rank(&records, &no_filter());
        assert_eq!(ids(&ranked), vec!["Alpha", "beta", ""]);
    }

    #[test]
    fn test_names_collate_accents_and_case() {
        let records = vec![
            catalog("Zeta score", Some(0.5), None),
            catalog("Émile score", Some(0.5), None),
            catalog("apple", Some(0.5), None),
            catalog("Apple", Some(0.5), None),
        ];
        let ranked = rank(&records, &no_filter());
        assert_eq!(ids(&ranked), vec!["apple", "Apple", "Émile score", "Zeta score"]);
    }

    #[test]
    fn test_nan_metrics_count_as_missing() {
        let records = vec![
            catalog("nan", Some(f64::NAN), Some(f64::NAN)),
            catalog("low", Some(0.4), None),
            catalog("zero", Some(0.0), Some(0.0)),
            catalog("high", Some(0.8), None),
            catalog("also nan", Some(f64::NAN), None),
        ];
        let ranked = rank(&records, &no_filter());
        assert_eq!(ids(&ranked), vec!["high", "low", "also nan", "nan", "zero"]);
        assert_eq!(display_auc(&records[0], &no_filter()), 0.0);
    }
}
