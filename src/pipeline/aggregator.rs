//! Combines per-page results into the run's aggregate

use crate::model::{Aggregate, PageResult};

/// Concatenates page results in page order
///
/// Results are ordered by page number before concatenation, so records of
/// page `i` always precede those of page `j` when `i < j`; within a page the
/// extracted order is kept. Degraded pages contribute no records but are
/// counted.
pub fn aggregate(mut results: Vec<PageResult>) -> Aggregate {
    results.sort_by_key(|result| result.task);

    let mut aggregate = Aggregate {
        records: Vec::with_capacity(results.iter().map(|r| r.records.len()).sum()),
        pages_total: results.len() as u32,
        ..Aggregate::default()
    };

    for result in results {
        if result.is_degraded() {
            aggregate.pages_degraded += 1;
        } else {
            aggregate.pages_extracted += 1;
        }
        aggregate.records.extend(result.records);
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageTask, Record};

    fn record(bin: &str) -> Record {
        Record::new(bin, "VISA", "BANK", "DEBIT", "CLASSIC")
    }

    fn page(n: u32, bins: &[&str]) -> PageResult {
        PageResult::extracted(PageTask::new(n), bins.iter().map(|b| record(b)).collect())
    }

    fn bins(aggregate: &Aggregate) -> Vec<&str> {
        aggregate.iter().map(|r| r.bin.as_str()).collect()
    }

    #[test]
    fn test_concatenates_in_page_order() {
        let aggregate = aggregate(vec![
            page(1, &["1a", "1b"]),
            page(2, &["2a"]),
            page(3, &["3a", "3b"]),
        ]);
        assert_eq!(bins(&aggregate), vec!["1a", "1b", "2a", "3a", "3b"]);
        assert_eq!(aggregate.pages_total, 3);
        assert_eq!(aggregate.pages_extracted, 3);
    }

    #[test]
    fn test_out_of_order_input_is_reordered() {
        let aggregate = aggregate(vec![
            page(3, &["3a"]),
            page(1, &["1a", "1b"]),
            page(2, &["2a"]),
        ]);
        assert_eq!(bins(&aggregate), vec!["1a", "1b", "2a", "3a"]);
    }

    #[test]
    fn test_degraded_page_keeps_neighbors_intact() {
        let aggregate = aggregate(vec![
            page(1, &["411111"]),
            PageResult::degraded(PageTask::new(2)),
            page(3, &["555555"]),
        ]);
        assert_eq!(bins(&aggregate), vec!["411111", "555555"]);
        assert_eq!(aggregate.pages_degraded, 1);
        assert_eq!(aggregate.pages_extracted, 2);
    }

    #[test]
    fn test_all_degraded_is_empty() {
        let aggregate = aggregate(
            (1..=4)
                .map(|n| PageResult::degraded(PageTask::new(n)))
                .collect(),
        );
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.pages_total, 4);
        assert_eq!(aggregate.pages_degraded, 4);
    }

    #[test]
    fn test_no_pages() {
        let aggregate = aggregate(Vec::new());
        assert_eq!(aggregate, Aggregate::default());
    }
}
