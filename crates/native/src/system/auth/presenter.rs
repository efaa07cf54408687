use app_core::platform::{Navigation, Notice, Presenter};

/// Prints notices and navigation targets to the terminal.
pub struct TerminalPresenter {
    base_url: String,
}

impl TerminalPresenter {
    /// In-app routes are printed relative to `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn describe(&self, target: &Navigation) -> String {
        match target {
            Navigation::External(url) => {
                format!("Open this URL in your browser to continue:\n  {}", url)
            }
            Navigation::Route(path) => format!("→ {}{}", self.base_url, path),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn alert(&self, notice: &Notice) {
        if notice.is_error() {
            tracing::warn!("{}", notice);
            eprintln!("✗ {}", notice);
        } else {
            println!("✓ {}", notice);
        }
    }

    fn navigate(&self, target: &Navigation) {
        println!("{}", self.describe(target));
    }
}
