use app_core::platform::{Navigation, Notice, Presenter};
use web_sys::window;

/// Shows notices and performs navigation in the browser.
///
/// Success notices pop a native alert. Errors are rendered inline by the
/// auth screen from the controller state, so they are only logged here.
pub struct BrowserPresenter {
    navigate_route: Box<dyn Fn(&str)>,
}

impl BrowserPresenter {
    /// `navigate_route` opens an in-app route (normally the router's navigate).
    pub fn new(navigate_route: impl Fn(&str) + 'static) -> Self {
        Self {
            navigate_route: Box::new(navigate_route),
        }
    }
}

impl Presenter for BrowserPresenter {
    fn alert(&self, notice: &Notice) {
        if notice.is_error() {
            log::warn!("{}", notice);
            return;
        }
        log::info!("{}", notice);
        if let Some(w) = window() {
            let _ = w.alert_with_message(&notice.message);
        }
    }

    fn navigate(&self, target: &Navigation) {
        match target {
            Navigation::External(url) => {
                log::info!("Redirecting to provider: {}", url);
                if let Some(w) = window() {
                    if let Err(e) = w.location().set_href(url) {
                        log::error!("Failed to redirect: {:?}", e);
                    }
                }
            }
            Navigation::Route(path) => (self.navigate_route)(path),
        }
    }
}
