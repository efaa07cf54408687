use contracts::enums::auth_mode::AuthMode;
use contracts::enums::social_provider::SocialProvider;

use super::form::AuthFormState;

/// What the auth screen shows for a given [`AuthFormState`].
///
/// Both hosts render from this, so the visibility rules live in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthScreenView {
    pub heading: &'static str,
    pub subheading: &'static str,
    pub card_title: &'static str,
    pub card_subtitle: &'static str,
    /// Full-width "Continue with ..." buttons.
    pub social_buttons: bool,
    /// "Continue with Email" button.
    pub email_button: bool,
    pub email_form: bool,
    pub name_field: bool,
    /// "Back to Social Options".
    pub back_button: bool,
    /// Compact provider icons under the email form.
    pub social_icons: bool,
    pub submit_label: &'static str,
    pub controls_disabled: bool,
    pub toggle_prompt: &'static str,
    pub toggle_link: &'static str,
    pub footer: &'static str,
}

impl AuthScreenView {
    pub fn from_state(state: &AuthFormState) -> Self {
        let sign_up = state.mode == AuthMode::SignUp;
        let choosing = !sign_up && !state.email_form_visible;
        let email_in_sign_in = !sign_up && state.email_form_visible;

        Self {
            heading: "Welcome to Your App",
            subheading: if sign_up {
                "Create your account to get started"
            } else {
                "Sign in to access your account"
            },
            card_title: if sign_up { "Sign up" } else { "Sign in" },
            card_subtitle: if sign_up {
                "Create your account to continue"
            } else {
                "Welcome back! Please sign in to continue"
            },
            social_buttons: choosing,
            email_button: choosing,
            email_form: state.email_form_visible || sign_up,
            name_field: sign_up,
            back_button: email_in_sign_in,
            social_icons: email_in_sign_in,
            submit_label: if state.busy {
                "Please wait..."
            } else if sign_up {
                "Sign Up"
            } else {
                "Sign In"
            },
            controls_disabled: state.busy,
            toggle_prompt: if sign_up {
                "Already have an account?"
            } else {
                "Don't have an account?"
            },
            toggle_link: if sign_up {
                "Click here to sign into your account"
            } else {
                "Click here to sign up as you can use email or social options"
            },
            footer: "Secured by Better Auth",
        }
    }

    pub fn social_button_label(provider: SocialProvider) -> String {
        format!("Continue with {}", provider.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_choice_screen() {
        let view = AuthScreenView::from_state(&AuthFormState::new(AuthMode::SignIn));
        assert!(view.social_buttons);
        assert!(view.email_button);
        assert!(!view.email_form);
        assert!(!view.back_button);
        assert_eq!(view.card_title, "Sign in");
    }

    #[test]
    fn test_sign_in_with_email_form() {
        let mut state = AuthFormState::new(AuthMode::SignIn);
        state.email_form_visible = true;
        let view = AuthScreenView::from_state(&state);
        assert!(!view.social_buttons);
        assert!(view.email_form);
        assert!(!view.name_field);
        assert!(view.back_button);
        assert!(view.social_icons);
        assert_eq!(view.submit_label, "Sign In");
    }

    #[test]
    fn test_sign_up_always_shows_form() {
        let mut state = AuthFormState::new(AuthMode::SignUp);
        state.busy = true;
        let view = AuthScreenView::from_state(&state);
        assert!(view.email_form);
        assert!(view.name_field);
        assert!(!view.social_buttons);
        assert!(!view.back_button);
        assert!(view.controls_disabled);
        assert_eq!(view.submit_label, "Please wait...");
        assert_eq!(view.toggle_prompt, "Already have an account?");
    }

    #[test]
    fn test_button_label() {
        assert_eq!(
            AuthScreenView::social_button_label(SocialProvider::Github),
            "Continue with GitHub"
        );
    }
}
