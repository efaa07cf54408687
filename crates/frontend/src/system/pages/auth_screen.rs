use std::rc::Rc;

use app_core::auth::{AuthFlowController, AuthScreenView};
use contracts::enums::auth_mode::AuthMode;
use contracts::enums::social_provider::SocialProvider;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::system::auth::api::HttpAuthClient;
use crate::system::auth::presenter::BrowserPresenter;

fn provider_glyph(provider: SocialProvider) -> &'static str {
    match provider {
        SocialProvider::Google => "G",
        SocialProvider::Facebook => "f",
        SocialProvider::Github => "GH",
    }
}

/// Sign-in / sign-up screen.
#[component]
pub fn AuthScreen(#[prop(optional)] default_mode: AuthMode) -> impl IntoView {
    let navigate = use_navigate();
    let presenter = BrowserPresenter::new(move |path| navigate(path, Default::default()));
    let controller = AuthFlowController::new(
        Rc::new(HttpAuthClient::new()),
        Rc::new(presenter),
        default_mode,
    );

    let state = RwSignal::new(controller.state());
    controller
        .subscribe(move |s| state.set(s.clone()))
        .detach();
    let screen = Memo::new(move |_| AuthScreenView::from_state(&state.read()));

    let controller = StoredValue::new_local(controller);

    // A live session puts the screen in sign-in mode
    let ctrl = controller.get_value();
    spawn_local(async move {
        ctrl.check_existing_session().await;
    });

    on_cleanup(move || {
        let _ = controller.try_with_value(|c| c.dispose());
    });

    let on_social = move |provider: SocialProvider| {
        let ctrl = controller.get_value();
        spawn_local(async move {
            if let Err(e) = ctrl.select_social_provider(provider).await {
                log::debug!("social sign-in via {} ended: {}", provider, e);
            }
        });
    };

    let on_submit = move || {
        let ctrl = controller.get_value();
        spawn_local(async move {
            if let Err(e) = ctrl.submit_email_form().await {
                log::debug!("email form submission ended: {}", e);
            }
        });
    };

    let disabled = Signal::derive(move || screen.get().controls_disabled);
    let error_notice = move || {
        state
            .read()
            .notice
            .clone()
            .filter(|notice| notice.is_error())
    };

    view! {
        <div class="auth-container">
            <div class="auth-header">
                <h1>{move || screen.get().heading}</h1>
                <p class="auth-header__subtitle">{move || screen.get().subheading}</p>
            </div>

            <div class="auth-card">
                <div class="auth-card__header">
                    <h2>{move || screen.get().card_title}</h2>
                    <p>{move || screen.get().card_subtitle}</p>
                </div>

                {move || error_notice().map(|notice| view! {
                    <div class="error-message">
                        <strong>{notice.title.clone()}</strong>
                        " "
                        {notice.message.clone()}
                        <button
                            class="error-message__close"
                            on:click=move |_| controller.with_value(|c| c.dismiss_notice())
                        >
                            "×"
                        </button>
                    </div>
                })}

                <Show when=move || screen.get().social_buttons>
                    <div class="auth-social">
                        {SocialProvider::all()
                            .into_iter()
                            .map(|provider| view! {
                                <Button
                                    class="auth-social__button"
                                    appearance=ButtonAppearance::Secondary
                                    disabled=disabled
                                    on_click=move |_| on_social(provider)
                                >
                                    <span class="auth-social__glyph">{provider_glyph(provider)}</span>
                                    {AuthScreenView::social_button_label(provider)}
                                </Button>
                            })
                            .collect_view()}
                    </div>
                    <div class="auth-divider"><span>"or"</span></div>
                </Show>

                <Show when=move || screen.get().email_button>
                    <Button
                        class="auth-email-button"
                        appearance=ButtonAppearance::Primary
                        disabled=disabled
                        on_click=move |_| controller.with_value(|c| c.toggle_email_form_visibility())
                    >
                        "Continue with Email"
                    </Button>
                </Show>

                <Show when=move || screen.get().email_form>
                    <div class="auth-form">
                        <Show when=move || screen.get().name_field>
                            <div class="form-group">
                                <label for="auth-name">"Full Name"</label>
                                <input
                                    type="text"
                                    id="auth-name"
                                    placeholder="Enter your full name"
                                    prop:value=move || state.read().name.clone()
                                    on:input=move |ev| {
                                        controller.with_value(|c| c.set_name(event_target_value(&ev)))
                                    }
                                    disabled=move || disabled.get()
                                />
                            </div>
                        </Show>

                        <div class="form-group">
                            <label for="auth-email">"Email"</label>
                            <input
                                type="email"
                                id="auth-email"
                                placeholder="Enter your email"
                                prop:value=move || state.read().email.clone()
                                on:input=move |ev| {
                                    controller.with_value(|c| c.set_email(event_target_value(&ev)))
                                }
                                disabled=move || disabled.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="auth-password">"Password"</label>
                            <input
                                type="password"
                                id="auth-password"
                                placeholder="Enter your password"
                                prop:value=move || state.read().password.clone()
                                on:input=move |ev| {
                                    controller.with_value(|c| c.set_password(event_target_value(&ev)))
                                }
                                disabled=move || disabled.get()
                            />
                        </div>

                        <Button
                            class="auth-form__submit"
                            appearance=ButtonAppearance::Primary
                            disabled=disabled
                            on_click=move |_| on_submit()
                        >
                            <Show when=move || disabled.get()>
                                <Spinner size=SpinnerSize::Tiny />
                            </Show>
                            {move || screen.get().submit_label}
                        </Button>

                        <Show when=move || screen.get().back_button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                disabled=disabled
                                on_click=move |_| controller.with_value(|c| c.toggle_email_form_visibility())
                            >
                                "Back to Social Options"
                            </Button>
                        </Show>

                        <Show when=move || screen.get().social_icons>
                            <div class="auth-social-icons">
                                {SocialProvider::all()
                                    .into_iter()
                                    .map(|provider| view! {
                                        <Button
                                            shape=ButtonShape::Circular
                                            appearance=ButtonAppearance::Secondary
                                            disabled=disabled
                                            on_click=move |_| on_social(provider)
                                        >
                                            {provider_glyph(provider)}
                                        </Button>
                                    })
                                    .collect_view()}
                            </div>
                        </Show>
                    </div>
                </Show>

                <div class="auth-toggle">
                    <span>{move || screen.get().toggle_prompt}</span>
                    " "
                    <a
                        href="#"
                        class="auth-toggle__link"
                        on:click=move |ev| {
                            ev.prevent_default();
                            controller.with_value(|c| {
                                if state.read_untracked().mode.is_sign_up() {
                                    c.switch_to_sign_in();
                                } else {
                                    c.switch_to_sign_up();
                                }
                            });
                        }
                    >
                        {move || screen.get().toggle_link}
                    </a>
                </div>
            </div>

            <p class="auth-footer">{move || screen.get().footer}</p>
        </div>
    }
}
