//! Checkbox Editor Component
//!
//! Inline editor for a set of ids (roles of a user, permissions of a role).

use leptos::prelude::*;

#[component]
pub fn CheckboxEditor(
    /// `(id, label)` choices
    options: Vec<(u64, String)>,
    selected: Vec<u64>,
    #[prop(into)] on_save: Callback<Vec<u64>>,
    #[prop(into, default = "Edit".to_string())] label: String,
) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let chosen = RwSignal::new(selected.clone());
    let initial = StoredValue::new(selected);

    view! {
        <Show
            when=move || editing.get()
            fallback={
                let label = label.clone();
                move || {
                    let label = label.clone();
                    view! {
                        <button class="edit-btn" on:click=move |_| {
                            chosen.set(initial.get_value());
                            set_editing.set(true);
                        }>
                            {label}
                        </button>
                    }
                }
            }
        >
            <div class="checkbox-editor">
                {options.clone().into_iter().map(|(id, name)| view! {
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || chosen.with(|c| c.contains(&id))
                            on:change=move |ev| chosen.update(|c| {
                                c.retain(|x| *x != id);
                                if event_target_checked(&ev) {
                                    c.push(id);
                                }
                            })
                        />
                        {name}
                    </label>
                }).collect_view()}
                <button class="confirm-btn" on:click=move |_| {
                    set_editing.set(false);
                    on_save.run(chosen.get_untracked());
                }>
                    "Save"
                </button>
                <button class="cancel-btn" on:click=move |_| set_editing.set(false)>"Cancel"</button>
            </div>
        </Show>
    }
}
