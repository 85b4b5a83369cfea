//! Share Menu Component
//!
//! Share links for one article. Every share is counted locally.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::ShareTarget;

use crate::browser;
use crate::context::use_app_context;
use crate::store::{store_push_toast, use_app_store, ToastKind};

#[component]
pub fn ShareMenu(id: u64, #[prop(into)] slug: String, #[prop(into)] title: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (open, set_open) = signal(false);
    let (count, set_count) = signal(ctx.share_log().count(&id.to_string()));
    let content_url = browser::absolute_url(&format!("library/{}", slug));

    let share = move |target: ShareTarget, content_url: String, title: String| {
        set_count.set(ctx.share_log().record(&id.to_string(), target));
        set_open.set(false);
        let link = target.share_url(&content_url, &title);
        match target {
            ShareTarget::CopyLink => spawn_local(async move {
                match browser::copy_text(&link).await {
                    Ok(()) => {
                        store_push_toast(&store, ToastKind::Success, "Link copied");
                    }
                    Err(e) => {
                        log::warn!("{}", e);
                        store_push_toast(&store, ToastKind::Error, "Could not copy the link");
                    }
                }
            }),
            _ => {
                if let Err(e) = browser::open_url(&link) {
                    log::warn!("{}", e);
                }
            }
        }
    };

    view! {
        <div class="share-menu">
            <button
                class="share-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_open.update(|o| *o = !*o);
                }
            >
                "Share"
                <Show when=move || { count.get() > 0 }>
                    <span class="share-count">{move || count.get()}</span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <ul class="share-targets">
                    {
                        let content_url = content_url.clone();
                        let title = title.clone();
                        ShareTarget::ALL.into_iter().map(move |target| {
                            let content_url = content_url.clone();
                            let title = title.clone();
                            view! {
                                <li>
                                    <button on:click=move |ev| {
                                        ev.stop_propagation();
                                        share(target, content_url.clone(), title.clone());
                                    }>
                                        {target.label()}
                                    </button>
                                </li>
                            }
                        }).collect_view()
                    }
                </ul>
            </Show>
        </div>
    }
}
