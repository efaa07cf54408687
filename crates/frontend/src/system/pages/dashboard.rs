use app_core::auth::AuthClient;
use contracts::system::auth::SessionUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::api::HttpAuthClient;

/// Landing route after a successful sign-in.
#[component]
pub fn DashboardPage() -> impl IntoView {
    // None while loading, Some(None) without a session
    let user = RwSignal::new(None::<Option<SessionUser>>);

    spawn_local(async move {
        let current = match HttpAuthClient::new().get_session().await {
            Ok(response) => response.data.map(|d| d.user),
            Err(e) => {
                log::warn!("Failed to load session: {}", e);
                None
            }
        };
        let _ = user.try_set(Some(current));
    });

    view! {
        <div class="dashboard">
            <h1>"Dashboard"</h1>
            {move || match user.get() {
                None => view! { <p>"Loading..."</p> }.into_any(),
                Some(Some(u)) => view! {
                    <p>"Signed in as " <strong>{u.name.clone().unwrap_or_else(|| u.email.clone())}</strong></p>
                    <p class="dashboard__email">{u.email.clone()}</p>
                }
                .into_any(),
                Some(None) => view! {
                    <p>"No active session"</p>
                    <a href="/">"Back to sign in"</a>
                }
                .into_any(),
            }}
        </div>
    }
}
