use app_core::theme::{ThemeOption, ThemeSelectorState};
use contracts::enums::theme_mode::ThemeMode;
use leptos::prelude::*;
use thaw::*;

use super::use_theme;

/// Floating theme picker: a round toggle button with a "Choose Theme" popover.
#[component]
pub fn ThemeSelector() -> impl IntoView {
    let ctx = use_theme();
    let selector = RwSignal::new(ThemeSelectorState::default());

    let change_theme = move |mode: ThemeMode| {
        ctx.with_store(|store| {
            selector.update(|s| {
                s.select(store, mode);
            });
        });
    };

    view! {
        <div class="theme-select-wrapper">
            <Show when=move || selector.get().is_open()>
                // Clicking anywhere outside the popover closes it
                <div
                    class="theme-select-backdrop"
                    on:click=move |_| selector.update(|s| s.dismiss())
                ></div>
                <div class="theme-dropdown">
                    <div class="theme-dropdown__title">"Choose Theme"</div>
                    <For
                        each=move || ThemeOption::all(ctx.mode())
                        key=|option| (option.mode, option.active)
                        children=move |option| {
                            let mode = option.mode;
                            view! {
                                <button
                                    class=if option.active {
                                        "theme-dropdown__item theme-dropdown__item--active"
                                    } else {
                                        "theme-dropdown__item"
                                    }
                                    on:click=move |_| change_theme(mode)
                                >
                                    <span class="theme-dropdown__icon">{option.icon}</span>
                                    {option.label}
                                    <Show when=move || option.active>
                                        <span class="theme-dropdown__check">"✓"</span>
                                    </Show>
                                </button>
                            }
                        }
                    />
                </div>
            </Show>

            <Button
                shape=ButtonShape::Circular
                appearance=ButtonAppearance::Primary
                class="theme-select-toggle"
                on_click=move |_| selector.update(|s| s.toggle())
            >
                "⚙️"
            </Button>
        </div>
    }
}
