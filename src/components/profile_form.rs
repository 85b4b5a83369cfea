//! Profile Form Component
//!
//! Loads the signed-in user's profile and saves edits. Field errors are
//! shown inline and block submission.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::ListError;

use crate::api::profile::{self, ProfileUpdate};
use crate::context::use_app_context;
use crate::store::{store_push_toast, store_set_profile, use_app_store, ToastKind};

#[component]
pub fn ProfileForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let form = RwSignal::new(ProfileUpdate::default());
    let (field_error, set_field_error) = signal::<Option<(String, String)>>(None);
    let (saving, set_saving) = signal(false);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    spawn_local(async move {
        match profile::get_profile(&ctx.api()).await {
            Ok(loaded) => {
                form.try_set(ProfileUpdate::from_profile(&loaded));
                store_set_profile(&store, loaded);
            }
            Err(e) => {
                set_load_error.try_set(Some(e.banner().message));
            }
        }
    });

    let error_for = move |field: &'static str| {
        move || {
            field_error
                .get()
                .filter(|(f, _)| f == field)
                .map(|(_, message)| view! { <p class="field-error">{message}</p> })
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = form.get_untracked();
        if let Err(ListError::Validation { field, message }) = update.validate() {
            set_field_error.set(Some((field, message)));
            return;
        }
        set_field_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match profile::update_profile(&ctx.api(), &update).await {
                Ok(saved) => {
                    store_set_profile(&store, saved);
                    store_push_toast(&store, ToastKind::Success, "Profile saved");
                }
                Err(ListError::Validation { field, message }) => {
                    set_field_error.try_set(Some((field, message)));
                }
                Err(e) => {
                    store_push_toast(&store, ToastKind::Error, e.banner().message);
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="profile-page">
            <h2>"Profile"</h2>
            {move || load_error.get().map(|e| view! { <div class="error-banner" role="alert">{e}</div> })}
            <form class="profile-form" on:submit=submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>
                {error_for("name")}
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </label>
                {error_for("email")}
                <label>
                    "Bio"
                    <textarea
                        prop:value=move || form.with(|f| f.bio.clone().unwrap_or_default())
                        on:input=move |ev| form.update(|f| {
                            let bio = event_target_value(&ev);
                            f.bio = (!bio.trim().is_empty()).then_some(bio);
                        })
                    />
                </label>
                <button type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving…" } else { "Save" }}
                </button>
            </form>
        </section>
    }
}
