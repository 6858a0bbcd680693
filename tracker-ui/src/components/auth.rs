//! Authentication Screen
//!
//! Login and registration forms; only one is shown at a time.

use leptos::*;

use crate::state::{display, use_app};

#[component]
pub fn AuthScreen() -> impl IntoView {
    let snapshot = use_app().snapshot;

    view! {
        <div class="auth-container">
            <h1 class="auth-title">
                <i class="fas fa-code"></i>
                " DSA Tracker"
            </h1>
            <div style:display=move || display(snapshot.with(|s| s.visibility.login_form))>
                <LoginForm />
            </div>
            <div style:display=move || display(snapshot.with(|s| s.visibility.register_form))>
                <RegisterForm />
            </div>
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = use_app();
    let submit_controller = ctx.controller.clone();
    let switch_controller = ctx.controller;

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let controller = submit_controller.clone();
        let (e, p) = (email.get(), password.get());
        spawn_local(async move {
            if controller.login(&e, &p).await.is_ok() {
                set_email.set(String::new());
                set_password.set(String::new());
            }
        });
    };

    view! {
        <form id="login-form" class="auth-form" on:submit=on_submit>
            <h2>"Login"</h2>
            <input
                type="email"
                placeholder="Email"
                required
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                required
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">"Login"</button>
            <p class="auth-switch">
                "Don't have an account? "
                <a href="#" on:click=move |ev: ev::MouseEvent| {
                    ev.prevent_default();
                    switch_controller.show_register_form();
                }>"Register"</a>
            </p>
        </form>
    }
}

#[component]
fn RegisterForm() -> impl IntoView {
    let ctx = use_app();
    let submit_controller = ctx.controller.clone();
    let switch_controller = ctx.controller;

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let controller = submit_controller.clone();
        let (u, e, p) = (username.get(), email.get(), password.get());
        spawn_local(async move {
            if controller.register(&u, &e, &p).await.is_ok() {
                set_username.set(String::new());
                set_email.set(String::new());
                set_password.set(String::new());
            }
        });
    };

    view! {
        <form id="register-form" class="auth-form" on:submit=on_submit>
            <h2>"Create Account"</h2>
            <input
                type="text"
                placeholder="Username"
                required
                prop:value=username
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email"
                required
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                required
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">"Register"</button>
            <p class="auth-switch">
                "Already have an account? "
                <a href="#" on:click=move |ev: ev::MouseEvent| {
                    ev.prevent_default();
                    switch_controller.show_login_form();
                }>"Login"</a>
            </p>
        </form>
    }
}
