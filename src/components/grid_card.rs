//! Article Card Component
//!
//! One library entry, in grid or list layout. Favorite and like go to the
//! server optimistically; "save" and "read" are local markers.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::{ReactionKind, ViewMode};

use super::list_view::ListHandle;
use super::share_menu::ShareMenu;
use crate::api::articles;
use crate::context::use_app_context;
use crate::models::Article;
use crate::store::{store_push_toast, use_app_store, ToastKind};

#[component]
pub fn GridCard(
    article: Article,
    list: ListHandle<Article>,
    #[prop(into)] on_open: Callback<Article>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = article.id;
    let record_id = id.to_string();

    let reactions = RwSignal::new(article.reactions);
    let (pending, set_pending) = signal(false);
    let (saved, set_saved) = signal(ctx.markers().is_favorite(&record_id));
    let (read, set_read) = signal(ctx.markers().is_read(&record_id));

    let stored = StoredValue::new(article.clone());

    let react = move |kind: ReactionKind| {
        if pending.get_untracked() {
            return;
        }
        let mut state = reactions.get_untracked();
        let snapshot = state.begin_toggle(kind);
        reactions.set(state);
        set_pending.set(true);

        spawn_local(async move {
            match articles::toggle_reaction(&ctx.api(), id, kind).await {
                Ok(server) => {
                    reactions.try_update(|r| r.reconcile(server));
                    let mut updated = stored.get_value();
                    updated.reactions = server;
                    stored.try_set_value(updated.clone());
                    list.mutate(|c| c.replace_item(updated));
                }
                Err(e) => {
                    reactions.try_update(|r| r.rollback(snapshot));
                    store_push_toast(&store, ToastKind::Error, e.banner().message);
                }
            }
            set_pending.try_set(false);
        });
    };

    let toggle_saved = {
        let record_id = record_id.clone();
        move |_| set_saved.set(ctx.markers().toggle_favorite(&record_id))
    };
    let toggle_read = {
        let record_id = record_id.clone();
        move |_| set_read.set(ctx.markers().toggle_read(&record_id))
    };
    let open = move |_| {
        ctx.markers().mark_read(&record_id);
        set_read.set(true);
        on_open.run(stored.get_value());
    };

    let layout = move || match list.with(|c| c.view()) {
        ViewMode::Grid => "article-card grid",
        ViewMode::List => "article-card row",
    };

    view! {
        <article class=layout class:read=move || read.get()>
            {article.cover_url.clone().map(|src| view! {
                <img class="cover" src=src alt="" loading="lazy" />
            })}
            <div class="card-body">
                <h3 class="card-title" on:click=open>
                    {article.is_protected.then(|| view! { <span class="lock" title="Protected">"🔒 "</span> })}
                    {article.title.clone()}
                </h3>
                <p class="card-meta">
                    {article.category.as_ref().map(|c| c.name.clone()).unwrap_or_default()}
                    {article.author.as_ref().map(|a| format!(" · {}", a.name)).unwrap_or_default()}
                    {article.rating.map(|r| format!(" · ★ {:.1}", r)).unwrap_or_default()}
                </p>
                {article.excerpt.clone().map(|e| view! { <p class="excerpt">{e}</p> })}
            </div>
            <footer class="card-actions">
                <button
                    class="reaction-btn"
                    class:active=move || reactions.get().favorited
                    disabled=move || pending.get()
                    on:click=move |_| react(ReactionKind::Favorite)
                >
                    {move || format!("♥ {}", reactions.get().favorite_count)}
                </button>
                <button
                    class="reaction-btn"
                    class:active=move || reactions.get().liked
                    disabled=move || pending.get()
                    on:click=move |_| react(ReactionKind::Like)
                >
                    {move || format!("👍 {}", reactions.get().like_count)}
                </button>
                <button class="marker-btn" class:active=move || saved.get() on:click=toggle_saved>
                    {move || if saved.get() { "Saved" } else { "Save" }}
                </button>
                <button class="marker-btn" on:click=toggle_read>
                    {move || if read.get() { "Mark unread" } else { "Mark read" }}
                </button>
                <ShareMenu id=id slug=article.slug.clone() title=article.title.clone() />
            </footer>
        </article>
    }
}
