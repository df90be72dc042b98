use std::fmt;
use std::str::FromStr;

use crate::error::FaturasError;

/// Columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    ClientNumber,
    Month,
    Year,
    ElectricEnergyR,
    EnergySceeR,
    PublicLightingR,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::ClientNumber,
        SortKey::Month,
        SortKey::Year,
        SortKey::ElectricEnergyR,
        SortKey::EnergySceeR,
        SortKey::PublicLightingR,
    ];

    /// Field name as it appears in the backend JSON and in share links.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ClientNumber => "clientNumber",
            SortKey::Month => "month",
            SortKey::Year => "year",
            SortKey::ElectricEnergyR => "electricEnergyR",
            SortKey::EnergySceeR => "energySCEER",
            SortKey::PublicLightingR => "publicLightingR",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FaturasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FaturasError::InvalidSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = FaturasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(FaturasError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// An active sort. "Unsorted" is the absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(y) => *y == year,
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str("all"),
            YearFilter::Year(y) => write!(f, "{y}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = FaturasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(YearFilter::All);
        }
        s.parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| FaturasError::InvalidYear(s.to_string()))
    }
}

/// Rows per page, restricted to the sizes the pager offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    pub const ALLOWED: [u32; 4] = [5, 10, 20, 50];

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = FaturasError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if PageSize::ALLOWED.contains(&value) {
            Ok(PageSize(value))
        } else {
            Err(FaturasError::InvalidPageSize(value.to_string()))
        }
    }
}

impl FromStr for PageSize {
    type Err = FaturasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .parse()
            .map_err(|_| FaturasError::InvalidPageSize(s.to_string()))?;
        PageSize::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current filter, sort, pagination and selection of the invoice table.
///
/// Any change that can alter which rows match, or how many fit on a page,
/// sends the view back to page 1. Sorting and selection keep the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    text_filter: String,
    year_filter: YearFilter,
    sort: Option<Sort>,
    page: u32,
    page_size: PageSize,
    selected_id: Option<String>,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            text_filter: String::new(),
            year_filter: YearFilter::All,
            sort: None,
            page: 1,
            page_size: PageSize::default(),
            selected_id: None,
        }
    }
}

impl ViewParams {
    pub fn text_filter(&self) -> &str {
        &self.text_filter
    }

    pub fn year_filter(&self) -> YearFilter {
        self.year_filter
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn set_text_filter(&mut self, value: impl Into<String>) {
        self.text_filter = value.into();
        self.page = 1;
    }

    pub fn set_year_filter(&mut self, value: YearFilter) {
        self.year_filter = value;
        self.page = 1;
    }

    /// Cycle the sort on `key`: ascending, then descending, then unsorted.
    /// Clicking a different column always starts it ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = match self.sort {
            Some(Sort {
                key: current,
                direction: SortDirection::Ascending,
            }) if current == key => Some(Sort {
                key,
                direction: SortDirection::Descending,
            }),
            Some(Sort {
                key: current,
                direction: SortDirection::Descending,
            }) if current == key => None,
            _ => Some(Sort {
                key,
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Replace the sort outright, as when restoring a saved view.
    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    /// No clamping: a page past the end simply shows no rows.
    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page = 1;
    }

    /// Highlight `id`, or clear the highlight if `id` is already selected or `None`.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected_id = match id {
            Some(id) if self.selected_id.as_deref() != Some(id) => Some(id.to_string()),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> ViewParams {
        let mut params = ViewParams::default();
        params.set_page(3);
        params
    }

    #[test]
    fn defaults() {
        let params = ViewParams::default();
        assert_eq!(params.text_filter(), "");
        assert_eq!(params.year_filter(), YearFilter::All);
        assert_eq!(params.sort(), None);
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size().get(), 10);
        assert_eq!(params.selected_id(), None);
    }

    #[test]
    fn filters_and_page_size_reset_page() {
        let mut params = on_page_three();
        params.set_text_filter("123");
        assert_eq!(params.page(), 1);

        let mut params = on_page_three();
        params.set_year_filter(YearFilter::Year(2023));
        assert_eq!(params.page(), 1);

        let mut params = on_page_three();
        params.set_page_size(PageSize::try_from(20).unwrap());
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size().get(), 20);
    }

    #[test]
    fn sorting_and_selection_keep_page() {
        let mut params = on_page_three();
        params.toggle_sort(SortKey::Year);
        params.select(Some("abc"));
        assert_eq!(params.page(), 3);
    }

    #[test]
    fn toggle_sort_cycles_three_states() {
        let mut params = ViewParams::default();

        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(
            params.sort(),
            Some(Sort {
                key: SortKey::ElectricEnergyR,
                direction: SortDirection::Ascending
            })
        );

        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(
            params.sort().map(|s| s.direction),
            Some(SortDirection::Descending)
        );

        params.toggle_sort(SortKey::ElectricEnergyR);
        assert_eq!(params.sort(), None);
    }

    #[test]
    fn toggle_other_key_starts_ascending() {
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::Year);
        params.toggle_sort(SortKey::Year);
        params.toggle_sort(SortKey::Month);
        assert_eq!(
            params.sort(),
            Some(Sort {
                key: SortKey::Month,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn select_toggles_single_row() {
        let mut params = ViewParams::default();
        params.select(Some("a"));
        assert_eq!(params.selected_id(), Some("a"));

        params.select(Some("b"));
        assert_eq!(params.selected_id(), Some("b"));

        params.select(Some("b"));
        assert_eq!(params.selected_id(), None);

        params.select(Some("a"));
        params.select(None);
        assert_eq!(params.selected_id(), None);
    }

    #[test]
    fn page_size_accepts_only_known_sizes() {
        for size in PageSize::ALLOWED {
            assert_eq!(PageSize::try_from(size).unwrap().get(), size);
        }
        assert!(PageSize::try_from(15).is_err());
        assert!("abc".parse::<PageSize>().is_err());
        assert_eq!("50".parse::<PageSize>().unwrap().get(), 50);
    }

    #[test]
    fn parses_sort_keys_and_years() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("totalR".parse::<SortKey>().is_err());

        assert_eq!("all".parse::<YearFilter>().unwrap(), YearFilter::All);
        assert_eq!(
            "2024".parse::<YearFilter>().unwrap(),
            YearFilter::Year(2024)
        );
        assert!("last".parse::<YearFilter>().is_err());
    }
}
