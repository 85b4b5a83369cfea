//! Filter Panel Component
//!
//! Edits the draft filters of a list. Nothing is fetched until Apply;
//! closing the panel throws the draft away.

use leptos::prelude::*;
use list_state::{FieldKind, FieldSpec, FilterValue, ListRecord};

use super::list_view::ListHandle;

/// `(value, label)` pairs for a multi-select field
pub type FilterOptions = Callback<&'static str, Vec<(String, String)>>;

#[component]
pub fn FilterPanel<R: ListRecord>(
    list: ListHandle<R>,
    /// Choices for multi-select fields; free text when absent
    #[prop(optional)]
    options: Option<FilterOptions>,
) -> impl IntoView {
    let is_open = move || list.with(|c| c.panel().is_open());
    let fields = list.with(|c| c.panel().schema().fields().to_vec());
    let active_count = move || list.with(|c| c.chips().len());

    view! {
        <div class="filter-panel-wrapper">
            <button
                class="filter-toggle"
                on:click=move |_| {
                    if is_open() {
                        list.mutate(|c| c.close_filters());
                    } else {
                        list.mutate(|c| c.open_filters());
                    }
                }
            >
                {move || match active_count() {
                    0 => "Filters".to_string(),
                    n => format!("Filters ({})", n),
                }}
            </button>
            <Show when=is_open>
                <div class="filter-panel">
                    {fields.clone().into_iter().map(|field| view! {
                        <FilterField list=list field=field options=options />
                    }).collect_view()}
                    <div class="filter-actions">
                        <button class="apply-btn" on:click=move |_| list.act(|c| Some(c.apply_filters()))>
                            "Apply"
                        </button>
                        <button class="reset-btn" on:click=move |_| list.act(|c| Some(c.reset_filters()))>
                            "Reset"
                        </button>
                        <button class="cancel-btn" on:click=move |_| list.mutate(|c| c.close_filters())>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn FilterField<R: ListRecord>(list: ListHandle<R>, field: FieldSpec, options: Option<FilterOptions>) -> impl IntoView {
    let key = field.key;
    let draft = move || list.with(|c| c.panel().draft().get(key).cloned());
    let set = move |value: FilterValue| list.mutate(|c| c.set_draft(key, value));

    let input = match field.kind {
        FieldKind::Text => view! {
            <input
                type="text"
                prop:value=move || match draft() {
                    Some(FilterValue::Text(s)) => s,
                    _ => String::new(),
                }
                on:change=move |ev| set(FilterValue::Text(event_target_value(&ev)))
            />
        }
        .into_any(),
        FieldKind::Multi => match options {
            Some(options) => {
                let selected = move || match draft() {
                    Some(FilterValue::Multi(v)) => v,
                    _ => Vec::new(),
                };
                view! {
                    <div class="filter-multi">
                        {move || options.run(key).into_iter().map(|(value, label)| {
                            let checked_value = value.clone();
                            view! {
                                <label class="filter-option">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selected().contains(&checked_value)
                                        on:change=move |ev| {
                                            let mut current = selected();
                                            if event_target_checked(&ev) {
                                                current.push(value.clone());
                                            } else {
                                                current.retain(|v| v != &value);
                                            }
                                            set(FilterValue::Multi(current));
                                        }
                                    />
                                    {label}
                                </label>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_any()
            }
            None => view! {
                <input
                    type="text"
                    placeholder="comma, separated"
                    prop:value=move || match draft() {
                        Some(FilterValue::Multi(v)) => v.join(", "),
                        _ => String::new(),
                    }
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        set(FilterValue::multi(raw.split(',').map(str::to_string)));
                    }
                />
            }
            .into_any(),
        },
        FieldKind::Range { lo, hi } => {
            let bounds = move || match draft() {
                Some(FilterValue::Range { min, max }) => (min, max),
                _ => (None, None),
            };
            let show = |n: Option<f64>| n.map(|n| n.to_string()).unwrap_or_default();
            let parse = |ev: &web_sys::Event| event_target_value(ev).trim().parse::<f64>().ok();
            view! {
                <div class="filter-range">
                    <input
                        type="number"
                        min=lo.to_string()
                        max=hi.to_string()
                        step="0.5"
                        prop:value=move || show(bounds().0)
                        on:change=move |ev| set(FilterValue::Range { min: parse(&ev), max: bounds().1 })
                    />
                    <span>"–"</span>
                    <input
                        type="number"
                        min=lo.to_string()
                        max=hi.to_string()
                        step="0.5"
                        prop:value=move || show(bounds().1)
                        on:change=move |ev| set(FilterValue::Range { min: bounds().0, max: parse(&ev) })
                    />
                </div>
            }
            .into_any()
        }
        FieldKind::DateRange => {
            let dates = move || match draft() {
                Some(FilterValue::DateRange { from, to }) => (from, to),
                _ => (None, None),
            };
            let non_empty = |s: String| (!s.is_empty()).then_some(s);
            view! {
                <div class="filter-dates">
                    <input
                        type="date"
                        prop:value=move || dates().0.unwrap_or_default()
                        on:change=move |ev| set(FilterValue::DateRange {
                            from: non_empty(event_target_value(&ev)),
                            to: dates().1,
                        })
                    />
                    <span>"–"</span>
                    <input
                        type="date"
                        prop:value=move || dates().1.unwrap_or_default()
                        on:change=move |ev| set(FilterValue::DateRange {
                            from: dates().0,
                            to: non_empty(event_target_value(&ev)),
                        })
                    />
                </div>
            }
            .into_any()
        }
        FieldKind::Flag => view! {
            <input
                type="checkbox"
                prop:checked=move || matches!(draft(), Some(FilterValue::Flag(true)))
                on:change=move |ev| set(FilterValue::Flag(event_target_checked(&ev)))
            />
        }
        .into_any(),
    };

    view! {
        <div class="filter-field">
            <label class="filter-label">{field.label}</label>
            {input}
        </div>
    }
}
