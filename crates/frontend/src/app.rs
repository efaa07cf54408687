use contracts::enums::auth_mode::AuthMode;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::shared::theme::{ThemeProvider, ThemeSelector};
use crate::system::pages::auth_screen::AuthScreen;
use crate::system::pages::dashboard::DashboardPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ThemeProvider>
            <Router>
                <main class="app-main">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=|| view! { <AuthScreen default_mode=AuthMode::SignIn /> } />
                        <Route path=path!("/signup") view=|| view! { <AuthScreen default_mode=AuthMode::SignUp /> } />
                        <Route path=path!("/dashboard") view=DashboardPage />
                    </Routes>
                </main>
            </Router>
            <ThemeSelector />
        </ThemeProvider>
    }
}
