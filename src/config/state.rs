use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::{from_query_pairs, to_query_pairs, ViewParams};

/// The table view as it was left by the last `list`, kept in the same flat
/// form a share link uses.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct State {
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default)]
    pub view: BTreeMap<String, String>,
}

impl State {
    pub fn from_params(params: &ViewParams) -> Self {
        Self {
            view: to_query_pairs(params)
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            selected: params.selected_id().map(str::to_string),
        }
    }

    pub fn to_params(&self) -> ViewParams {
        let mut params = from_query_pairs(&self.view);
        params.select(self.selected.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SortKey, YearFilter};

    #[test]
    fn round_trips_through_toml() {
        let mut params = ViewParams::default();
        params.set_text_filter("7005");
        params.set_year_filter(YearFilter::Year(2024));
        params.toggle_sort(SortKey::Month);
        params.set_page(2);
        params.select(Some("inv-1"));

        let text = toml::to_string_pretty(&State::from_params(&params)).unwrap();
        let state: State = toml::from_str(&text).unwrap();
        assert_eq!(state.to_params(), params);
    }

    #[test]
    fn empty_state_is_default_view() {
        let state: State = toml::from_str("").unwrap();
        assert_eq!(state.to_params(), ViewParams::default());
    }
}
