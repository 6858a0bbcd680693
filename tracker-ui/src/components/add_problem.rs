//! Add Problem Form
//!
//! Submits a solved problem; the dashboard reloads on success.

use leptos::*;

use dsa_tracker::{Difficulty, NewProblem};

use crate::state::use_app;

#[component]
pub fn AddProblemForm() -> impl IntoView {
    let controller = use_app().controller;

    let (title, set_title) = create_signal(String::new());
    let (difficulty, set_difficulty) = create_signal(Difficulty::Easy);
    let (link, set_link) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let controller = controller.clone();
        let problem = NewProblem::new(title.get(), difficulty.get(), link.get());
        spawn_local(async move {
            if controller.add_problem(problem).await.is_ok() {
                set_title.set(String::new());
                set_difficulty.set(Difficulty::Easy);
                set_link.set(String::new());
            }
        });
    };

    view! {
        <form id="add-problem-form" class="problem-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Problem title"
                required
                prop:value=title
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <select
                prop:value=move || difficulty.get().as_str()
                on:change=move |ev| {
                    if let Ok(d) = event_target_value(&ev).parse() {
                        set_difficulty.set(d);
                    }
                }
            >
                {Difficulty::ALL
                    .into_iter()
                    .map(|d| view! { <option value=d.as_str()>{d.as_str()}</option> })
                    .collect_view()}
            </select>
            <input
                type="url"
                placeholder="Link (optional)"
                prop:value=link
                on:input=move |ev| set_link.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">
                <i class="fas fa-plus"></i>
                " Add Problem"
            </button>
        </form>
    }
}
