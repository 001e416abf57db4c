use crate::i18n::{tr, tr_count};
use royal_core::StatusSummary;
use std::collections::BTreeMap;
use yew::prelude::*;

/// Localized status text, e.g. "Showing 5 maps from 42 available maps (filtered by 2023)".
#[must_use]
pub fn status_text(summary: &StatusSummary) -> String {
    let mut text = if summary.shown > 0 {
        let shown = summary.shown.to_string();
        let available = summary.available.to_string();
        let mut args = BTreeMap::new();
        args.insert("shown", shown.as_str());
        args.insert("available", available.as_str());
        tr("status.showing", Some(&args))
    } else {
        tr_count("status.available", summary.available)
    };
    if let Some(years) = &summary.filtered_by {
        let joined = years.join(", ");
        let mut args = BTreeMap::new();
        args.insert("years", joined.as_str());
        text.push_str(&tr("status.filtered_by", Some(&args)));
    }
    text
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub summary: StatusSummary,
}

#[function_component(StatusLine)]
pub fn status_line(p: &Props) -> Html {
    html! {
        <p class="status-line">{ status_text(&p.summary) }</p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_matches_core_wording() {
        let cases = [
            StatusSummary {
                shown: 5,
                available: 42,
                filtered_by: None,
            },
            StatusSummary {
                shown: 0,
                available: 7,
                filtered_by: Some(vec!["2022".into(), "2023".into()]),
            },
            StatusSummary {
                shown: 0,
                available: 0,
                filtered_by: None,
            },
        ];
        for summary in cases {
            assert_eq!(status_text(&summary), summary.to_string());
        }
    }
}
