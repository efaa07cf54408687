//! Sign-in / sign-up screen state.

pub mod client;
mod controller;
mod form;
mod view;

pub use client::{decode_envelope, AuthClient, ClientError};
pub use controller::{AuthFlowController, AuthFlowError, EmailOutcome, SocialOutcome};
pub use form::{AuthFormState, FormField, ValidationError};
pub use view::AuthScreenView;
