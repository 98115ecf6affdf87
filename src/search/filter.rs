use crate::models::ResultRecord;
use crate::search::ancestry::{self, AncestryFilter};

/// Hard ancestry filter. Records that do not match are removed, except
/// user-authored and in-progress records, which always stay visible.
pub fn filter(records: &[ResultRecord], active: &AncestryFilter) -> Vec<ResultRecord> {
    if active.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| r.source.is_user_authored() || ancestry::matches(r.ancestry.as_deref(), active))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    fn record(id: &str, source: SourceKind, ancestry: Option<&str>) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            name: id.to_string(),
            source,
            ancestry: ancestry.map(str::to_string),
            ..ResultRecord::default()
        }
    }

    fn sample() -> Vec<ResultRecord> {
        vec![
            record("eur", SourceKind::Catalog, Some("European")),
            record("afr", SourceKind::Catalog, Some("African American")),
            record("none", SourceKind::Catalog, None),
            record("trained", SourceKind::UserTrained, Some("African")),
            record("uploaded", SourceKind::UserUploaded, None),
            record("pending", SourceKind::InProgress, None),
        ]
    }

    fn ids(records: &[ResultRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let all = sample();
        assert_eq!(filter(&all, &AncestryFilter::default()), all);
    }

    #[test]
    fn test_non_matching_catalog_records_are_removed() {
        let out = filter(&sample(), &AncestryFilter::new(["EUR"]));
        assert_eq!(ids(&out), vec!["eur", "trained", "uploaded", "pending"]);
    }

    #[test]
    fn test_unlabelled_catalog_record_never_passes() {
        let out = filter(&sample(), &AncestryFilter::new(["EUR", "AFR"]));
        assert!(!ids(&out).contains(&"none"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let active = AncestryFilter::new(["AFR"]);
        let once = filter(&sample(), &active);
        let twice = filter(&once, &active);
        assert_eq!(once, twice);
    }
}
