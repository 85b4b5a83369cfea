//! Legal Page Component
//!
//! Static terms text with reader preferences (font size, theme) that are
//! remembered in local storage.

use leptos::prelude::*;
use list_state::{ReadingPreferences, ReadingTheme};

use crate::context::use_app_context;

const SECTIONS: [(&str, &str); 3] = [
    (
        "Terms of use",
        "Content in the library is provided for personal reading. Redistribution requires the author's consent.",
    ),
    (
        "Privacy",
        "Favorites, reading markers and display preferences are stored in this browser only.",
    ),
    (
        "Protected content",
        "Passwords for protected articles are kept for the current tab and forgotten when it closes.",
    ),
];

#[component]
pub fn LegalPage() -> impl IntoView {
    let ctx = use_app_context();
    let prefs = RwSignal::new(ReadingPreferences::load(ctx.local_store().as_ref()));

    let change = move |f: &dyn Fn(&mut ReadingPreferences)| {
        prefs.update(|p| f(p));
        prefs.with_untracked(|p| p.save(ctx.local_store().as_ref()));
    };

    let theme_class = move || match prefs.get().theme {
        ReadingTheme::Light => "legal theme-light",
        ReadingTheme::Sepia => "legal theme-sepia",
        ReadingTheme::Dark => "legal theme-dark",
    };

    view! {
        <section class=theme_class style=move || format!("font-size: {}%", prefs.get().font_scale)>
            <div class="reading-controls">
                <button on:click=move |_| change(&|p: &mut ReadingPreferences| p.step_font(-10))>"A−"</button>
                <button on:click=move |_| change(&|p: &mut ReadingPreferences| p.step_font(10))>"A+"</button>
                {[ReadingTheme::Light, ReadingTheme::Sepia, ReadingTheme::Dark].into_iter().map(|theme| view! {
                    <button
                        class:active=move || prefs.get().theme == theme
                        on:click=move |_| change(&move |p: &mut ReadingPreferences| p.theme = theme)
                    >
                        {format!("{:?}", theme)}
                    </button>
                }).collect_view()}
            </div>
            {SECTIONS.into_iter().map(|(title, body)| view! {
                <h3>{title}</h3>
                <p>{body}</p>
            }).collect_view()}
        </section>
    }
}
