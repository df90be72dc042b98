use std::cmp::Ordering;

use tracing::debug;

use super::params::{SortDirection, SortKey, ViewParams};
use crate::invoice::InvoiceRecord;

/// The rows of the current page plus the size of the whole filtered result.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub visible: Vec<&'a InvoiceRecord>,
    pub total_items: usize,
    pub total_pages: u32,
}

enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

fn field_value(record: &InvoiceRecord, key: SortKey) -> FieldValue<'_> {
    match key {
        SortKey::ClientNumber => FieldValue::Text(&record.client_number),
        SortKey::Month => FieldValue::Text(&record.month),
        SortKey::Year => FieldValue::Number(f64::from(record.year)),
        SortKey::ElectricEnergyR => FieldValue::Number(record.electric_energy_r),
        SortKey::EnergySceeR => FieldValue::Number(record.energy_scee_r),
        SortKey::PublicLightingR => FieldValue::Number(record.public_lighting_r),
    }
}

fn compare_by_field(a: &InvoiceRecord, b: &InvoiceRecord, key: SortKey) -> Ordering {
    match (field_value(a, key), field_value(b, key)) {
        // UTF-16 code unit order; UTF-8 byte order disagrees for U+E000..U+FFFF
        // against supplementary-plane characters.
        (FieldValue::Text(a), FieldValue::Text(b)) => a.encode_utf16().cmp(b.encode_utf16()),
        // Equal magnitudes (0.0 and -0.0) tie; NaN falls back to a total order so the sort stays consistent.
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
        }
        _ => Ordering::Equal,
    }
}

/// Filter, sort and slice `records` according to `params`.
///
/// The text filter is a case-sensitive substring match on the client number.
/// Sorting is stable, so ties keep their order from the filtered list.
/// A page outside `1..=total_pages` yields no rows.
pub fn compute_visible<'a>(records: &'a [InvoiceRecord], params: &ViewParams) -> TableView<'a> {
    let text = params.text_filter();
    let year = params.year_filter();

    let mut filtered: Vec<&InvoiceRecord> = records
        .iter()
        .filter(|r| r.client_number.contains(text))
        .filter(|r| year.matches(r.year))
        .collect();

    if let Some(sort) = params.sort() {
        filtered.sort_by(|a, b| {
            let cmp = compare_by_field(a, b, sort.key);
            match sort.direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        });
    }

    let total_items = filtered.len();
    let page_size = params.page_size().get() as usize;
    let total_pages = total_items.div_ceil(page_size) as u32;

    let visible = match params.page().checked_sub(1) {
        Some(index) => filtered
            .into_iter()
            .skip(index as usize * page_size)
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    debug!(
        total_items,
        total_pages,
        page = params.page(),
        shown = visible.len(),
        "derived table view"
    );

    TableView {
        visible,
        total_items,
        total_pages,
    }
}

/// Years present in `records`, in order of first appearance.
pub fn distinct_years(records: &[InvoiceRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = Vec::new();
    for record in records {
        if !years.contains(&record.year) {
            years.push(record.year);
        }
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PageSize, YearFilter};

    fn record(id: &str, client: &str, year: i32, energy: f64) -> InvoiceRecord {
        InvoiceRecord {
            id: id.to_string(),
            client_number: client.to_string(),
            month: "JAN".to_string(),
            year,
            electric_energy_r: energy,
            ..Default::default()
        }
    }

    fn ids(view: &TableView<'_>) -> Vec<String> {
        view.visible.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> Vec<InvoiceRecord> {
        vec![
            record("a", "7005400387", 2023, 30.0),
            record("b", "7202788969", 2024, 10.0),
            record("c", "7005400387", 2024, 20.0),
            record("d", "3001116735", 2023, 10.0),
            record("e", "7202788969", 2023, 50.0),
        ]
    }

    #[test]
    fn text_filter_is_case_sensitive_substring() {
        let records = vec![
            record("1", "ABC-100", 2024, 0.0),
            record("2", "abc-200", 2024, 0.0),
            record("3", "XY-100", 2024, 0.0),
        ];
        let mut params = ViewParams::default();

        params.set_text_filter("100");
        assert_eq!(ids(&compute_visible(&records, &params)), ["1", "3"]);

        params.set_text_filter("ABC");
        assert_eq!(ids(&compute_visible(&records, &params)), ["1"]);

        params.set_text_filter("");
        assert_eq!(compute_visible(&records, &params).total_items, 3);
    }

    #[test]
    fn filtered_rows_match_and_excluded_rows_do_not() {
        let records = sample();
        let mut params = ViewParams::default();
        params.set_text_filter("7005");
        params.set_year_filter(YearFilter::Year(2024));
        let view = compute_visible(&records, &params);

        assert_eq!(ids(&view), ["c"]);
        for r in &records {
            let included = view.visible.iter().any(|v| v.id == r.id);
            let matches = r.client_number.contains("7005") && r.year == 2024;
            assert_eq!(included, matches, "record {}", r.id);
        }
    }

    #[test]
    fn sort_ties_keep_filtered_order() {
        let records = sample();
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(
            ids(&compute_visible(&records, &params)),
            ["b", "d", "c", "a", "e"]
        );

        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(
            ids(&compute_visible(&records, &params)),
            ["e", "a", "c", "b", "d"]
        );

        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(
            ids(&compute_visible(&records, &params)),
            ["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn text_sort_uses_utf16_order() {
        let records = vec![
            record("halfwidth", "\u{FF61}", 2024, 0.0),
            record("emoji", "\u{1F600}", 2024, 0.0),
            record("ascii", "7005400387", 2024, 0.0),
        ];
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::ClientNumber);

        assert_eq!(
            ids(&compute_visible(&records, &params)),
            ["ascii", "emoji", "halfwidth"]
        );
    }

    #[test]
    fn sorts_text_columns() {
        let records = sample();
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::ClientNumber);
        assert_eq!(
            ids(&compute_visible(&records, &params)),
            ["d", "a", "c", "b", "e"]
        );
    }

    #[test]
    fn sorting_is_idempotent() {
        let records = sample();
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::Year);
        params.toggle_sort(SortKey::Year);

        let once: Vec<InvoiceRecord> = compute_visible(&records, &params)
            .visible
            .into_iter()
            .cloned()
            .collect();
        let twice = compute_visible(&once, &params);
        assert_eq!(
            ids(&twice),
            once.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn pages_concatenate_to_full_result() {
        let records: Vec<InvoiceRecord> = (0..23)
            .map(|i| record(&i.to_string(), &format!("C{}", i % 4), 2024, f64::from(i % 7)))
            .collect();
        let mut params = ViewParams::default();
        params.set_page_size(PageSize::try_from(5).unwrap());
        params.toggle_sort(SortKey::ElectricEnergyR);

        let first = compute_visible(&records, &params);
        assert_eq!(first.total_items, 23);
        assert_eq!(first.total_pages, 5);

        let mut all_params = params.clone();
        all_params.set_page_size(PageSize::try_from(50).unwrap());
        let expected = ids(&compute_visible(&records, &all_params));

        let mut joined = Vec::new();
        for page in 1..=first.total_pages {
            params.set_page(page);
            let view = compute_visible(&records, &params);
            assert!(view.visible.len() <= 5);
            joined.extend(ids(&view));
        }
        assert_eq!(joined, expected);
        assert_eq!(joined.len(), 23);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let records = sample();
        let mut params = ViewParams::default();

        params.set_page(2);
        let view = compute_visible(&records, &params);
        assert!(view.visible.is_empty());
        assert_eq!(view.total_items, 5);
        assert_eq!(view.total_pages, 1);

        params.set_page(0);
        assert!(compute_visible(&records, &params).visible.is_empty());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let view = compute_visible(&[], &ViewParams::default());
        assert!(view.visible.is_empty());
        assert_eq!(view.total_items, 0);
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn year_filter_then_sort_scenario() {
        let records = vec![
            record("x", "100", 2023, 50.0),
            record("y", "200", 2024, 10.0),
        ];
        let mut params = ViewParams::default();
        params.set_year_filter(YearFilter::Year(2023));

        let view = compute_visible(&records, &params);
        assert_eq!(ids(&view), ["x"]);
        assert_eq!(view.total_items, 1);
        assert_eq!(view.total_pages, 1);

        params.toggle_sort(SortKey::ElectricEnergyR);
        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(
            params.sort().map(|s| s.direction),
            Some(SortDirection::Descending)
        );
        assert_eq!(ids(&compute_visible(&records, &params)), ["x"]);

        params.set_year_filter(YearFilter::All);
        assert_eq!(ids(&compute_visible(&records, &params)), ["x", "y"]);
    }

    #[test]
    fn distinct_years_keep_first_appearance() {
        assert_eq!(distinct_years(&sample()), [2023, 2024]);
        assert!(distinct_years(&[]).is_empty());
    }
}
