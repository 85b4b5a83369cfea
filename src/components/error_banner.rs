//! Error Banner Component
//!
//! Dismissible inline banner for a failed list load, with a manual retry.

use leptos::prelude::*;
use list_state::ListRecord;

use super::list_view::ListHandle;

#[component]
pub fn ErrorBanner<R: ListRecord>(list: ListHandle<R>) -> impl IntoView {
    let banner = move || list.with(|c| c.error().map(|e| e.banner()));

    view! {
        {move || banner().map(|banner| view! {
            <div class="error-banner" role="alert">
                <span class="error-message">{banner.message}</span>
                {(banner.status > 0).then(|| view! {
                    <span class="error-status">{format!("({})", banner.status)}</span>
                })}
                <button class="retry-btn" on:click=move |_| list.act(|c| c.retry())>
                    "Retry"
                </button>
                <button class="dismiss-btn" on:click=move |_| list.mutate(|c| c.dismiss_error())>
                    "×"
                </button>
            </div>
        })}
    }
}
