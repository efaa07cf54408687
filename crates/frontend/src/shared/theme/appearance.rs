use app_core::platform::AppearanceSource;
use app_core::subscription::Subscription;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, MediaQueryList, MediaQueryListEvent};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

fn dark_scheme_query() -> Option<MediaQueryList> {
    window()?.match_media(DARK_SCHEME_QUERY).ok()?
}

/// OS appearance through the `prefers-color-scheme` media query.
pub struct MediaQueryAppearance;

impl AppearanceSource for MediaQueryAppearance {
    fn is_dark(&self) -> bool {
        dark_scheme_query().map(|q| q.matches()).unwrap_or(false)
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        let Some(query) = dark_scheme_query() else {
            log::warn!("matchMedia unavailable, theme will not follow the OS");
            return Subscription::empty();
        };

        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
            on_change(event.matches());
        });

        if let Err(e) =
            query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        {
            log::warn!("Failed to watch color scheme: {:?}", e);
            return Subscription::empty();
        }

        // The guard owns the closure; removing the listener before the
        // closure is dropped keeps the JS side from calling freed memory.
        Subscription::new(move || {
            let _ = query
                .remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
            drop(listener);
        })
    }
}
