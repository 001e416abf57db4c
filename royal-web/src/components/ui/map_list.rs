use crate::i18n::{t, tr};
use royal_core::MapRecord;
use std::collections::BTreeMap;
use yew::prelude::*;

/// Display data for one drawn map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapRow {
    pub id: AttrValue,
    pub name: AttrValue,
    pub author: AttrValue,
    pub author_time: Option<AttrValue>,
    pub download: Option<AttrValue>,
}

impl MapRow {
    #[must_use]
    pub fn from_record(record: &MapRecord) -> Self {
        Self {
            id: AttrValue::from(record.id.clone()),
            name: AttrValue::from(record.name.clone()),
            author: AttrValue::from(record.author.clone()),
            author_time: record.author_time_label().map(AttrValue::from),
            download: record.download.clone().map(AttrValue::from),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub maps: Vec<MapRow>,
    pub on_remove: Callback<AttrValue>,
}

fn with_arg(key: &str, name: &str, value: &str) -> String {
    let mut args = BTreeMap::new();
    args.insert(name, value);
    tr(key, Some(&args))
}

#[function_component(MapList)]
pub fn map_list(p: &Props) -> Html {
    let rows = p.maps.iter().enumerate().map(|(idx, row)| {
        let on_remove = {
            let cb = p.on_remove.clone();
            let id = row.id.clone();
            Callback::from(move |_| cb.emit(id.clone()))
        };
        let download = row.download.as_ref().map(|href| {
            html! {
                <a class="map-row__download" href={href.clone()} target="_blank" rel="noopener noreferrer"
                    aria-label={with_arg("list.download_label", "name", &row.name)}>
                    { t("list.download") }
                </a>
            }
        });
        let author_time = row.author_time.as_ref().map(|time| {
            html! { <span class="map-row__time">{ with_arg("list.author_time", "time", time) }</span> }
        });
        html! {
            <li class="map-row" key={row.id.to_string()} data-map-id={row.id.clone()}>
                <span class="map-row__index" aria-hidden="true">{ (idx + 1).to_string() }</span>
                <div class="map-row__info">
                    <span class="map-row__name">{ row.name.clone() }</span>
                    <span class="map-row__author">{ with_arg("list.by_author", "author", &row.author) }</span>
                    { author_time.unwrap_or_default() }
                </div>
                { download.unwrap_or_default() }
                <button type="button" class="map-row__remove"
                    aria-label={with_arg("actions.replace", "name", &row.name)}
                    onclick={on_remove}>
                    <span aria-hidden="true">{"✕"}</span>
                </button>
            </li>
        }
    });

    html! {
        <section class="map-list" aria-labelledby="map-list-title">
            <h2 id="map-list-title">{ t("list.title") }</h2>
            <ol class="map-list__items">{ for rows }</ol>
        </section>
    }
}
