//! Password Gate Component
//!
//! Prompts for the password of protected content. A password cached earlier
//! in this tab is tried first; a rejected one is forgotten.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::validate_password;

use crate::api::articles;
use crate::context::use_app_context;
use crate::models::ArticleContent;

#[component]
pub fn PasswordGate(
    #[prop(into)] slug: String,
    #[prop(into)] on_unlocked: Callback<ArticleContent>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let slug = StoredValue::new(slug);
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let attempt = move |input: String, from_cache: bool| {
        if let Err(e) = validate_password(&input) {
            set_error.set(Some(e.banner().message));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        let slug = slug.get_value();
        spawn_local(async move {
            match articles::unlock(&ctx.api(), &slug, &input).await {
                Ok(content) => {
                    ctx.password_cache().set_stored_password(&slug, &input);
                    on_unlocked.run(content);
                }
                Err(e) if e.is_auth_failure() => {
                    ctx.password_cache().clear_stored_password(&slug);
                    // a stale cached password just re-prompts
                    if !from_cache {
                        set_error.try_set(Some("Incorrect password".to_string()));
                    }
                }
                Err(e) => {
                    set_error.try_set(Some(e.banner().message));
                }
            }
            set_busy.try_set(false);
        });
    };

    let cached = ctx.password_cache().get_stored_password(&slug.get_value());
    if !cached.is_empty() {
        attempt(cached, true);
    }

    view! {
        <div class="password-gate" role="dialog">
            <h3>"This content is protected"</h3>
            <form on:submit=move |ev| {
                ev.prevent_default();
                attempt(password.get_untracked(), false);
            }>
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                <div class="form-actions">
                    <button type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Checking…" } else { "Unlock" }}
                    </button>
                    <button type="button" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                </div>
            </form>
        </div>
    }
}
