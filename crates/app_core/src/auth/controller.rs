use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contracts::enums::auth_mode::AuthMode;
use contracts::enums::social_provider::SocialProvider;
use contracts::system::auth::{
    AuthResponse, EmailAuthData, EmailSignInRequest, EmailSignUpRequest, SocialSignInData,
    SocialSignInRequest, DEFAULT_CALLBACK_URL,
};

use super::client::{AuthClient, ClientError};
use super::form::{AuthFormState, ValidationError};
use super::view::AuthScreenView;
use crate::platform::{Navigation, Notice, Presenter};
use crate::subscription::{Observers, Subscription};

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    /// The auth service rejected the request; `message` is shown verbatim.
    #[error("{message}")]
    Provider { message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("another request is still in progress")]
    Busy,
    #[error("the auth screen was closed")]
    Disposed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialOutcome {
    /// The provider flow continues at this URL.
    Redirected(String),
    /// Signed in without leaving the app; the callback route was opened.
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailOutcome {
    SignedIn,
    /// Account created; the screen is back in sign-in mode.
    SignedUp,
}

/// View-state machine of the sign-in / sign-up screen.
///
/// All authentication is delegated to the [`AuthClient`]; this only decides
/// what the screen shows next. One instance per mounted screen. Cloning
/// yields another handle to the same controller.
#[derive(Clone)]
pub struct AuthFlowController {
    inner: Rc<Inner>,
}

struct Inner {
    state: RefCell<AuthFormState>,
    client: Rc<dyn AuthClient>,
    presenter: Rc<dyn Presenter>,
    callback_url: String,
    disposed: Cell<bool>,
    observers: Observers<AuthFormState>,
}

impl AuthFlowController {
    pub fn new(
        client: Rc<dyn AuthClient>,
        presenter: Rc<dyn Presenter>,
        default_mode: AuthMode,
    ) -> Self {
        Self::with_callback_url(client, presenter, default_mode, DEFAULT_CALLBACK_URL)
    }

    pub fn with_callback_url(
        client: Rc<dyn AuthClient>,
        presenter: Rc<dyn Presenter>,
        default_mode: AuthMode,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(AuthFormState::new(default_mode)),
                client,
                presenter,
                callback_url: callback_url.into(),
                disposed: Cell::new(false),
                observers: Observers::new(),
            }),
        }
    }

    pub fn state(&self) -> AuthFormState {
        self.inner.state.borrow().clone()
    }

    pub fn view(&self) -> AuthScreenView {
        AuthScreenView::from_state(&self.inner.state.borrow())
    }

    pub fn callback_url(&self) -> &str {
        &self.inner.callback_url
    }

    pub fn subscribe(&self, observer: impl Fn(&AuthFormState) + 'static) -> Subscription {
        self.inner.observers.subscribe(observer)
    }

    /// Detach from the screen. Calls still in flight resolve without
    /// touching state or the presenter.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.inner.observers.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Someone who already has a session gets the sign-in form.
    pub async fn check_existing_session(&self) {
        match self.inner.client.get_session().await {
            Ok(AuthResponse {
                data: Some(session),
                ..
            }) => {
                log::debug!("Existing session for {}", session.user.email);
                self.update(|s| switch_mode(s, AuthMode::SignIn));
            }
            Ok(AuthResponse {
                error: Some(error), ..
            }) => log::debug!("Session lookup rejected: {}", error.message),
            Ok(_) => {}
            Err(e) => log::debug!("Session lookup failed: {}", e),
        }
    }

    pub async fn select_social_provider(
        &self,
        provider: SocialProvider,
    ) -> Result<SocialOutcome, AuthFlowError> {
        self.begin()?;

        let request = SocialSignInRequest {
            provider,
            callback_url: self.inner.callback_url.clone(),
        };
        let result = self.inner.client.sign_in_social(request).await;
        if self.is_disposed() {
            log::debug!("{} sign-in finished after the screen closed", provider);
            return Err(AuthFlowError::Disposed);
        }

        let outcome = self.finish_social(provider, result);
        self.update(|s| s.busy = false);
        outcome
    }

    fn finish_social(
        &self,
        provider: SocialProvider,
        result: Result<AuthResponse<SocialSignInData>, ClientError>,
    ) -> Result<SocialOutcome, AuthFlowError> {
        match result {
            Ok(AuthResponse {
                error: Some(error), ..
            }) => {
                log::warn!("{} OAuth error: {}", provider, error.message);
                self.present(Notice::error("OAuth Error", error.message.clone()));
                Err(AuthFlowError::Provider {
                    message: error.message,
                })
            }
            Ok(response) => {
                let url = response
                    .data
                    .and_then(|data| data.url)
                    .filter(|url| !url.is_empty());
                match url {
                    Some(url) => {
                        self.inner
                            .presenter
                            .navigate(&Navigation::External(url.clone()));
                        Ok(SocialOutcome::Redirected(url))
                    }
                    None => {
                        self.present(Notice::success(format!(
                            "{} authentication successful!",
                            capitalized(provider)
                        )));
                        self.inner
                            .presenter
                            .navigate(&Navigation::Route(self.inner.callback_url.clone()));
                        Ok(SocialOutcome::Authenticated)
                    }
                }
            }
            Err(e) => {
                log::error!("{} OAuth error: {}", provider, e);
                self.present(Notice::error(
                    "Error",
                    format!("Failed to authenticate with {}. Please try again.", provider),
                ));
                Err(e.into())
            }
        }
    }

    pub async fn submit_email_form(&self) -> Result<EmailOutcome, AuthFlowError> {
        if self.is_disposed() {
            return Err(AuthFlowError::Disposed);
        }
        if self.inner.state.borrow().busy {
            return Err(AuthFlowError::Busy);
        }

        let form = self.state();
        if let Err(e) = form.validate() {
            self.present(Notice::error("Error", "Please fill in all fields"));
            return Err(e.into());
        }

        self.begin()?;
        let mode = form.mode;
        let callback_url = self.inner.callback_url.clone();
        let result = match mode {
            AuthMode::SignUp => {
                let request = EmailSignUpRequest {
                    email: form.email,
                    password: form.password,
                    name: form.name,
                    callback_url,
                };
                self.inner.client.sign_up_email(request).await
            }
            AuthMode::SignIn => {
                let request = EmailSignInRequest {
                    email: form.email,
                    password: form.password,
                    callback_url,
                };
                self.inner.client.sign_in_email(request).await
            }
        };
        if self.is_disposed() {
            log::debug!("{} finished after the screen closed", mode.as_str());
            return Err(AuthFlowError::Disposed);
        }

        let outcome = self.finish_email(mode, result);
        self.update(|s| s.busy = false);
        outcome
    }

    fn finish_email(
        &self,
        mode: AuthMode,
        result: Result<AuthResponse<EmailAuthData>, ClientError>,
    ) -> Result<EmailOutcome, AuthFlowError> {
        match result {
            Ok(AuthResponse {
                error: Some(error), ..
            }) => {
                log::warn!("{} rejected: {}", mode.as_str(), error.message);
                self.present(Notice::error("Authentication Error", error.message.clone()));
                Err(AuthFlowError::Provider {
                    message: error.message,
                })
            }
            Ok(response) => {
                let user = response.data.and_then(|data| data.user);
                log::info!(
                    "{} succeeded for {}",
                    mode.as_str(),
                    user.as_ref().map(|u| u.email.as_str()).unwrap_or("<unknown>")
                );
                match mode {
                    AuthMode::SignUp => {
                        self.present(Notice::success("Account created successfully!"));
                        self.update(|s| {
                            switch_mode(s, AuthMode::SignIn);
                            s.email_form_visible = false;
                        });
                        Ok(EmailOutcome::SignedUp)
                    }
                    AuthMode::SignIn => {
                        self.present(Notice::success("Signed in successfully!"));
                        Ok(EmailOutcome::SignedIn)
                    }
                }
            }
            Err(e) => {
                log::error!("{} error: {}", mode.as_str(), e);
                self.present(Notice::error(
                    "Error",
                    format!("Failed to {}", mode.as_str()),
                ));
                Err(e.into())
            }
        }
    }

    /// Shows or hides the email form. Fields are blanked either way.
    pub fn toggle_email_form_visibility(&self) {
        self.update(|s| {
            s.email_form_visible = !s.email_form_visible;
            s.clear_fields();
        });
    }

    pub fn switch_to_sign_up(&self) {
        self.update(|s| {
            switch_mode(s, AuthMode::SignUp);
            s.email_form_visible = true;
            s.clear_fields();
        });
    }

    pub fn switch_to_sign_in(&self) {
        self.update(|s| {
            switch_mode(s, AuthMode::SignIn);
            s.clear_fields();
        });
    }

    pub fn set_email(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|s| s.email = value);
    }

    pub fn set_password(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|s| s.password = value);
    }

    pub fn set_name(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|s| s.name = value);
    }

    pub fn dismiss_notice(&self) {
        self.update(|s| s.notice = None);
    }

    fn begin(&self) -> Result<(), AuthFlowError> {
        if self.is_disposed() {
            return Err(AuthFlowError::Disposed);
        }
        if self.inner.state.borrow().busy {
            return Err(AuthFlowError::Busy);
        }
        self.update(|s| {
            s.busy = true;
            s.notice = None;
        });
        Ok(())
    }

    fn present(&self, notice: Notice) {
        if self.is_disposed() {
            return;
        }
        self.inner.presenter.alert(&notice);
        self.update(|s| s.notice = Some(notice));
    }

    fn update(&self, change: impl FnOnce(&mut AuthFormState)) {
        if self.is_disposed() {
            return;
        }
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            change(&mut state);
            state.clone()
        };
        self.inner.observers.notify(&snapshot);
    }
}

/// Provider id with its first letter upper-cased ("github" -> "Github").
/// Button labels use [`SocialProvider::display_name`] instead.
fn capitalized(provider: SocialProvider) -> String {
    let id = provider.as_str();
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn switch_mode(state: &mut AuthFormState, mode: AuthMode) {
    if state.mode != mode {
        state.mode = mode;
        state.clear_fields();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::form::FormField;
    use crate::platform::NoticeKind;
    use crate::testing::{RecordingPresenter, ScriptedAuthClient};
    use contracts::system::auth::{SessionData, SessionUser};

    struct Fixture {
        client: Rc<ScriptedAuthClient>,
        presenter: Rc<RecordingPresenter>,
        controller: AuthFlowController,
    }

    fn fixture(mode: AuthMode) -> Fixture {
        let client = Rc::new(ScriptedAuthClient::default());
        let presenter = Rc::new(RecordingPresenter::default());
        let controller = AuthFlowController::new(client.clone(), presenter.clone(), mode);
        Fixture {
            client,
            presenter,
            controller,
        }
    }

    fn fill(controller: &AuthFlowController) {
        controller.set_email("ann@example.com");
        controller.set_password("hunter22");
    }

    #[tokio::test]
    async fn test_sign_up_requires_name() {
        let f = fixture(AuthMode::SignIn);
        f.controller.switch_to_sign_up();
        fill(&f.controller);

        let err = f.controller.submit_email_form().await.unwrap_err();
        match err {
            AuthFlowError::Validation(e) => assert_eq!(e.missing, vec![FormField::Name]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.client.call_count(), 0);
        assert_eq!(
            f.presenter.last_notice().map(|n| n.message),
            Some("Please fill in all fields".to_string())
        );
        assert!(!f.controller.state().busy);
    }

    #[tokio::test]
    async fn test_successful_sign_up_returns_to_sign_in() {
        let f = fixture(AuthMode::SignIn);
        f.controller.switch_to_sign_up();
        fill(&f.controller);
        f.controller.set_name("Ann");

        let outcome = f.controller.submit_email_form().await.unwrap();
        assert_eq!(outcome, EmailOutcome::SignedUp);

        let state = f.controller.state();
        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.email, "");
        assert_eq!(state.password, "");
        assert_eq!(state.name, "");
        assert!(!state.email_form_visible);
        assert!(!state.busy);
        assert_eq!(
            *f.client.calls.borrow(),
            vec!["sign_up:ann@example.com:Ann".to_string()]
        );
        assert_eq!(
            state.notice.map(|n| n.message),
            Some("Account created successfully!".to_string())
        );
    }

    #[tokio::test]
    async fn test_sign_in_error_keeps_form_editable() {
        let f = fixture(AuthMode::SignIn);
        f.controller.toggle_email_form_visibility();
        fill(&f.controller);
        *f.client.sign_in.borrow_mut() = Some(Ok(AuthResponse::err("Invalid email or password")));

        let err = f.controller.submit_email_form().await.unwrap_err();
        assert!(matches!(err, AuthFlowError::Provider { ref message } if message == "Invalid email or password"));

        let state = f.controller.state();
        assert!(!state.busy);
        assert_eq!(state.email, "ann@example.com");
        assert!(state.email_form_visible);
        let notice = f.presenter.last_notice().unwrap();
        assert_eq!(notice.title, "Authentication Error");
        assert_eq!(notice.message, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_sign_in_transport_failure() {
        let f = fixture(AuthMode::SignIn);
        fill(&f.controller);
        *f.client.sign_in.borrow_mut() =
            Some(Err(ClientError::Transport("connection refused".to_string())));

        let err = f.controller.submit_email_form().await.unwrap_err();
        assert!(matches!(err, AuthFlowError::Client(_)));
        assert_eq!(
            f.presenter.last_notice().map(|n| n.message),
            Some("Failed to signin".to_string())
        );
        assert!(!f.controller.state().busy);
    }

    #[tokio::test]
    async fn test_social_error_surfaces_message() {
        let f = fixture(AuthMode::SignIn);
        *f.client.social.borrow_mut() = Some(Ok(AuthResponse::err("x")));

        let err = f
            .controller
            .select_social_provider(SocialProvider::Google)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthFlowError::Provider { ref message } if message == "x"));

        assert!(!f.controller.state().busy);
        let notice = f.presenter.last_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "x");
        assert!(f.presenter.navigations.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_social_redirect_follows_url() {
        let f = fixture(AuthMode::SignIn);
        *f.client.social.borrow_mut() = Some(Ok(AuthResponse::ok(SocialSignInData {
            url: Some("https://accounts.google.com/o/oauth2/auth?x=1".to_string()),
            redirect: true,
        })));

        let outcome = f
            .controller
            .select_social_provider(SocialProvider::Google)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SocialOutcome::Redirected("https://accounts.google.com/o/oauth2/auth?x=1".to_string())
        );
        assert!(f.presenter.notices.borrow().is_empty());
        assert_eq!(
            *f.presenter.navigations.borrow(),
            vec![Navigation::External(
                "https://accounts.google.com/o/oauth2/auth?x=1".to_string()
            )]
        );
        assert_eq!(
            *f.client.calls.borrow(),
            vec!["social:google:/dashboard".to_string()]
        );
    }

    #[tokio::test]
    async fn test_social_without_url_reports_and_routes() {
        let f = fixture(AuthMode::SignIn);

        let outcome = f
            .controller
            .select_social_provider(SocialProvider::Github)
            .await
            .unwrap();
        assert_eq!(outcome, SocialOutcome::Authenticated);
        assert_eq!(
            f.presenter.last_notice().map(|n| n.message),
            Some("Github authentication successful!".to_string())
        );
        assert_eq!(
            *f.presenter.navigations.borrow(),
            vec![Navigation::Route("/dashboard".to_string())]
        );
    }

    #[tokio::test]
    async fn test_social_transport_failure() {
        let f = fixture(AuthMode::SignIn);
        *f.client.social.borrow_mut() = Some(Err(ClientError::Decode("not json".to_string())));

        let result = f
            .controller
            .select_social_provider(SocialProvider::Facebook)
            .await;
        assert!(matches!(result, Err(AuthFlowError::Client(_))));
        assert_eq!(
            f.presenter.last_notice().map(|n| n.message),
            Some("Failed to authenticate with facebook. Please try again.".to_string())
        );
        assert!(!f.controller.state().busy);
    }

    #[tokio::test]
    async fn test_busy_rejects_second_submission() {
        let f = fixture(AuthMode::SignIn);
        fill(&f.controller);
        let release = f.client.hold_next_call();

        let mut first = Box::pin(f.controller.submit_email_form());
        assert!(futures::poll!(&mut first).is_pending());
        assert!(f.controller.state().busy);

        let second = f
            .controller
            .select_social_provider(SocialProvider::Google)
            .await;
        assert!(matches!(second, Err(AuthFlowError::Busy)));
        assert!(matches!(
            f.controller.submit_email_form().await,
            Err(AuthFlowError::Busy)
        ));

        release.send(()).unwrap();
        assert_eq!(first.await.unwrap(), EmailOutcome::SignedIn);
        assert!(!f.controller.state().busy);
        assert_eq!(f.client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_disposed_controller_ignores_late_result() {
        let f = fixture(AuthMode::SignIn);
        *f.client.social.borrow_mut() = Some(Ok(AuthResponse::err("late")));
        let release = f.client.hold_next_call();

        let mut pending = Box::pin(f.controller.select_social_provider(SocialProvider::Google));
        assert!(futures::poll!(&mut pending).is_pending());

        f.controller.dispose();
        release.send(()).unwrap();
        assert!(matches!(pending.await, Err(AuthFlowError::Disposed)));

        assert!(f.presenter.notices.borrow().is_empty());
        // Frozen at the moment of disposal.
        assert!(f.controller.state().busy);
    }

    #[tokio::test]
    async fn test_existing_session_selects_sign_in() {
        let f = fixture(AuthMode::SignUp);
        f.controller.set_name("Ann");
        *f.client.session.borrow_mut() = Some(Ok(AuthResponse::ok(SessionData {
            user: SessionUser {
                id: "u1".to_string(),
                email: "ann@example.com".to_string(),
                name: Some("Ann".to_string()),
            },
            session: None,
        })));

        f.controller.check_existing_session().await;
        let state = f.controller.state();
        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.name, "");
    }

    #[tokio::test]
    async fn test_session_lookup_failure_is_silent() {
        let f = fixture(AuthMode::SignUp);
        *f.client.session.borrow_mut() =
            Some(Err(ClientError::Transport("offline".to_string())));

        f.controller.check_existing_session().await;
        assert_eq!(f.controller.state().mode, AuthMode::SignUp);
        assert!(f.presenter.notices.borrow().is_empty());
    }

    #[test]
    fn test_local_transitions_blank_fields() {
        let f = fixture(AuthMode::SignIn);

        f.controller.toggle_email_form_visibility();
        fill(&f.controller);
        f.controller.toggle_email_form_visibility();
        let hidden = f.controller.state();
        assert!(!hidden.email_form_visible);
        assert_eq!(hidden.email, "");

        fill(&f.controller);
        f.controller.switch_to_sign_up();
        let sign_up = f.controller.state();
        assert_eq!(sign_up.mode, AuthMode::SignUp);
        assert!(sign_up.email_form_visible);
        assert_eq!(sign_up.password, "");

        f.controller.set_name("Ann");
        f.controller.switch_to_sign_in();
        let sign_in = f.controller.state();
        assert_eq!(sign_in.mode, AuthMode::SignIn);
        assert_eq!(sign_in.name, "");
    }

    #[test]
    fn test_observers_see_every_transition() {
        let f = fixture(AuthMode::SignIn);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = f
            .controller
            .subscribe(move |s| sink.borrow_mut().push(s.email_form_visible));

        f.controller.toggle_email_form_visibility();
        f.controller.toggle_email_form_visibility();
        assert_eq!(*seen.borrow(), vec![true, false]);

        f.controller.dispose();
        f.controller.toggle_email_form_visibility();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_notice_name_capitalizes_provider_id() {
        assert_eq!(capitalized(SocialProvider::Google), "Google");
        assert_eq!(capitalized(SocialProvider::Facebook), "Facebook");
        assert_eq!(capitalized(SocialProvider::Github), "Github");
    }
}
