//! Media Admin App
//!
//! Top-level layout: navigation bar plus one page at a time.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::Session;
use reactive_stores::Store;

use crate::api::activity::Scope;
use crate::api::{profile, roles};
use crate::components::{ActivityLog, ArticleLibrary, LegalPage, ProfileForm, ToastHost, UserRolesDisplay, UsersTable};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::storage::BrowserStorage;
use crate::store::{store_push_toast, store_set_profile, store_set_roles, AppState, AppStateStoreFields, ToastKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Users,
    Roles,
    MyActivity,
    AllActivity,
    Library,
    Profile,
    Legal,
}

impl Page {
    const ALL: [Page; 7] = [
        Page::Library,
        Page::Users,
        Page::Roles,
        Page::MyActivity,
        Page::AllActivity,
        Page::Profile,
        Page::Legal,
    ];

    fn label(&self) -> &'static str {
        match self {
            Page::Users => "Users",
            Page::Roles => "Roles",
            Page::MyActivity => "My Activity",
            Page::AllActivity => "Activity Log",
            Page::Library => "Library",
            Page::Profile => "Profile",
            Page::Legal => "Legal",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session = signal(Session::resolve(&BrowserStorage::Local, &BrowserStorage::Session));
    let ctx = AppContext::new(session, AppConfig::from_env());
    let store = Store::new(AppState::default());
    let (page, set_page) = signal(Page::Library);

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Profile and role catalogue, reloaded whenever the session changes
    Effect::new(move |_| {
        if !ctx.session.get().is_authenticated() {
            return;
        }
        spawn_local(async move {
            if let Ok(loaded) = profile::get_profile(&ctx.api()).await {
                store_set_profile(&store, loaded);
            }
            match roles::all_roles(&ctx.api()).await {
                Ok(loaded) => {
                    log::info!("loaded {} roles", loaded.len());
                    store_set_roles(&store, loaded);
                }
                Err(e) if e.is_auth_failure() => ctx.sign_out(),
                Err(e) => {
                    store_push_toast(&store, ToastKind::Error, e.banner().message);
                }
            }
        });
    });

    view! {
        <div class="app-layout">
            <Show
                when=move || ctx.session.get().is_authenticated()
                fallback=|| view! { <SignIn /> }
            >
                <nav class="main-nav">
                    {Page::ALL.into_iter().map(|p| view! {
                        <button class:active=move || page.get() == p on:click=move |_| set_page.set(p)>
                            {p.label()}
                        </button>
                    }).collect_view()}
                    <span class="nav-user">
                        {move || store.profile().get().map(|p| p.name).unwrap_or_default()}
                    </span>
                    <button class="sign-out" on:click=move |_| ctx.sign_out()>"Sign out"</button>
                </nav>
                <main class="main-content">
                    {move || match page.get() {
                        Page::Users => view! { <UsersTable /> }.into_any(),
                        Page::Roles => view! { <UserRolesDisplay /> }.into_any(),
                        Page::MyActivity => view! { <ActivityLog scope=Scope::Mine /> }.into_any(),
                        Page::AllActivity => view! { <ActivityLog scope=Scope::All /> }.into_any(),
                        Page::Library => view! { <ArticleLibrary /> }.into_any(),
                        Page::Profile => view! { <ProfileForm /> }.into_any(),
                        Page::Legal => view! { <LegalPage /> }.into_any(),
                    }}
                </main>
            </Show>
            <ToastHost />
        </div>
    }
}

/// Shown until a token is present in storage
#[component]
fn SignIn() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (token, set_token) = signal(String::new());

    view! {
        <form class="sign-in" on:submit=move |ev| {
            ev.prevent_default();
            let value = token.get_untracked();
            if !value.trim().is_empty() {
                ctx.sign_in(&value);
            }
        }>
            <h1>"Media Admin"</h1>
            <input
                type="password"
                placeholder="API token"
                prop:value=move || token.get()
                on:input=move |ev| set_token.set(event_target_value(&ev))
            />
            <button type="submit">"Sign in"</button>
        </form>
    }
}
