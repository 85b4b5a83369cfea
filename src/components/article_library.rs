//! Article Library Component
//!
//! Browsable media library: search, filters, grid or list layout, pages or
//! infinite scroll. Opening protected content goes through `PasswordGate`.

use leptos::prelude::*;
use list_state::{FilterValue, ViewMode};

use super::error_banner::ErrorBanner;
use super::filter_chips::FilterChips;
use super::filter_panel::{FilterOptions, FilterPanel};
use super::grid_card::GridCard;
use super::infinite_sentinel::InfiniteSentinel;
use super::list_view::use_list;
use super::pagination::Pagination;
use super::password_gate::PasswordGate;
use super::search_box::SearchBox;
use super::toolbar::{LoadModeToggle, ViewToggle};
use crate::api::articles::{self, FilterCatalog};
use crate::context::use_app_context;
use crate::models::{Article, ArticleContent};

/// What the reader pane shows
#[derive(Clone, Debug, PartialEq)]
enum Reader {
    Closed,
    Locked(Article),
    Open { title: String, html: String },
}

#[component]
pub fn ArticleLibrary() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list::<Article>(articles::list_config());
    let (reader, set_reader) = signal(Reader::Closed);
    let (saved_only, set_saved_only) = signal(false);

    let catalog = RwSignal::new(FilterCatalog::default());
    Effect::new(move |_| {
        let items = list.items();
        catalog.update(|c| c.absorb(&items));
    });
    let options: FilterOptions = Callback::new(move |key: &'static str| {
        let selected = list.with(|c| match c.panel().draft().get(key) {
            Some(FilterValue::Multi(ids)) => ids.clone(),
            _ => Vec::new(),
        });
        catalog.with(|c| c.options(key, &selected))
    });

    let visible = move || {
        let items = list.items();
        if saved_only.get() {
            let saved = ctx.markers().favorites();
            items.into_iter().filter(|a| saved.contains(&a.id.to_string())).collect()
        } else {
            items
        }
    };

    let open = Callback::new(move |article: Article| {
        if article.is_protected {
            set_reader.set(Reader::Locked(article));
        } else {
            set_reader.set(Reader::Open {
                title: article.title,
                html: article.excerpt.unwrap_or_default(),
            });
        }
    });

    view! {
        <section class="library-page">
            <header class="list-header">
                <h2>"Library"</h2>
                <SearchBox list=list placeholder="Search articles..." />
                <FilterPanel list=list options=options />
                <ViewToggle list=list />
                <LoadModeToggle list=list />
                <label class="saved-only">
                    <input
                        type="checkbox"
                        prop:checked=move || saved_only.get()
                        on:change=move |ev| set_saved_only.set(event_target_checked(&ev))
                    />
                    "Saved only"
                </label>
            </header>
            <FilterChips list=list />
            <ErrorBanner list=list />
            <div class=move || match list.with(|c| c.view()) {
                ViewMode::Grid => "article-grid",
                ViewMode::List => "article-rows",
            }>
                <Show when=move || list.with(|c| c.show_skeleton())>
                    {(0..6).map(|_| view! { <div class="article-card skeleton"></div> }).collect_view()}
                </Show>
                <For
                    each=visible
                    key=|article| article.id
                    children=move |article| view! { <GridCard article=article list=list on_open=open /> }
                />
            </div>
            <Show when=move || list.with(|c| !c.is_loading() && c.items().is_empty() && c.error().is_none())>
                <p class="empty-state">"Nothing here yet"</p>
            </Show>
            <Pagination list=list />
            <InfiniteSentinel list=list />

            {move || match reader.get() {
                Reader::Closed => ().into_any(),
                Reader::Locked(article) => view! {
                    <div class="modal-backdrop">
                        <PasswordGate
                            slug=article.slug.clone()
                            on_unlocked=Callback::new(move |content: ArticleContent| {
                                set_reader.set(Reader::Open { title: content.title, html: content.body_html });
                            })
                            on_cancel=Callback::new(move |_| set_reader.set(Reader::Closed))
                        />
                    </div>
                }
                .into_any(),
                Reader::Open { title, html } => view! {
                    <div class="modal-backdrop">
                        <article class="reader">
                            <header>
                                <h2>{title}</h2>
                                <button class="close-btn" on:click=move |_| set_reader.set(Reader::Closed)>"×"</button>
                            </header>
                            <div class="reader-body" inner_html=html></div>
                        </article>
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}
