//! Account registration with a user/admin role choice.

use leptos::prelude::*;
use records::auth::{Privilege, RegisterOutcome, validate_signup};

use crate::util::notify::use_notifier;

#[component]
pub fn SignupPage() -> impl IntoView {
    let notifier = use_notifier();

    let emp_id = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(Privilege::User);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Any edit clears the previous error.
    Effect::new(move || {
        emp_id.track();
        full_name.track();
        password.track();
        confirm.track();
        role.track();
        error.set(String::new());
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_signup(&emp_id.get(), &full_name.get(), &password.get(), &confirm.get(), role.get()) {
            Ok(request) => request,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&request).await {
                Ok(RegisterOutcome::Registered) => {
                    notifier.success(format!("{} is registered", request.full_name));
                    emp_id.set(String::new());
                    full_name.set(String::new());
                    password.set(String::new());
                    confirm.set(String::new());
                }
                Ok(RegisterOutcome::Failed(message)) => {
                    error.set(message.to_owned());
                    notifier.error(message);
                }
                Err(e) => notifier.api_error(&e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, notifier);
        }
    };

    let role_option = move |privilege: Privilege, label: &'static str| {
        view! {
            <label class="auth-form__radio">
                <input
                    type="radio"
                    name="privilege"
                    value=privilege.as_str()
                    prop:checked=move || role.get() == privilege
                    on:change=move |_| role.set(privilege)
                />
                <span>{label}</span>
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">"Register"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <label class="form-field">
                        <span class="form-field__label">"Employee ID"</span>
                        <input
                            class="form-field__input"
                            type="text"
                            prop:value=move || emp_id.get()
                            on:input=move |ev| emp_id.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-field__label">"Full Name"</span>
                        <input
                            class="form-field__input"
                            type="text"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-field__label">"Password"</span>
                        <input
                            class="form-field__input"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-field__label">"Confirm Password"</span>
                        <input
                            class="form-field__input"
                            type="password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="form-field">
                        <span class="form-field__label">"Role"</span>
                        <div class="auth-form__radios">
                            {role_option(Privilege::User, "User")}
                            {role_option(Privilege::Admin, "Admin")}
                        </div>
                    </div>
                    <Show when=move || !error.get().is_empty()>
                        <p class="auth-form__error">{move || error.get()}</p>
                    </Show>
                    <button class="btn btn--primary auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Login"</a>
                </p>
            </div>
        </div>
    }
}
