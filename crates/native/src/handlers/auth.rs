use std::rc::Rc;

use app_core::auth::{AuthClient, AuthFlowController, EmailOutcome, SocialOutcome};
use clap::Subcommand;
use contracts::enums::auth_mode::AuthMode;
use contracts::enums::social_provider::SocialProvider;

use crate::shared::config::Config;
use crate::system::auth::api::ReqwestAuthClient;
use crate::system::auth::presenter::TerminalPresenter;

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Show the current session, if any
    Session,
    /// Start a social sign-in (google, facebook, github)
    Social { provider: String },
    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account with email and password
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

fn build_controller(
    client: Rc<dyn AuthClient>,
    config: &Config,
    mode: AuthMode,
) -> AuthFlowController {
    AuthFlowController::with_callback_url(
        client,
        Rc::new(TerminalPresenter::new(&config.auth.base_url)),
        mode,
        config.auth.callback_url.clone(),
    )
}

pub async fn run(action: AuthAction, config: &Config) -> anyhow::Result<()> {
    let client: Rc<dyn AuthClient> = Rc::new(ReqwestAuthClient::new(&config.auth.base_url)?);

    match action {
        AuthAction::Session => {
            let response = client.get_session().await?;
            if let Some(error) = response.error {
                anyhow::bail!("{}", error.message);
            }
            match response.data {
                Some(session) => {
                    let user = session.user;
                    match user.name {
                        Some(name) => println!("Signed in as {} <{}>", name, user.email),
                        None => println!("Signed in as {}", user.email),
                    }
                    if let Some(expires_at) = session.session.and_then(|s| s.expires_at) {
                        println!("Session expires at {}", expires_at);
                    }
                }
                None => println!("No active session"),
            }
        }
        AuthAction::Social { provider } => {
            let provider: SocialProvider = provider.parse().map_err(anyhow::Error::msg)?;
            let controller = build_controller(client, config, AuthMode::SignIn);
            let outcome = controller.select_social_provider(provider).await?;
            if outcome == SocialOutcome::Authenticated {
                tracing::info!("Signed in with {}", provider.display_name());
            }
        }
        AuthAction::SignIn { email, password } => {
            let controller = build_controller(client, config, AuthMode::SignIn);
            controller.toggle_email_form_visibility();
            controller.set_email(email);
            controller.set_password(password);
            controller.submit_email_form().await?;
        }
        AuthAction::SignUp {
            name,
            email,
            password,
        } => {
            let controller = build_controller(client, config, AuthMode::SignUp);
            controller.set_name(name);
            controller.set_email(email);
            controller.set_password(password);
            if controller.submit_email_form().await? == EmailOutcome::SignedUp {
                println!("You can now sign in with `native auth sign-in`.");
            }
        }
    }

    Ok(())
}
