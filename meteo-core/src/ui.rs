//! Capabilities the search controller needs from its host UI.
//!
//! Everything runs on one UI thread, so methods take `&self` and
//! implementations are free to use `Cell`/`RefCell` internally.

use std::time::Duration;

use crate::view::DayView;

/// City input plus its submit control.
pub trait SearchForm {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn set_submit_enabled(&self, enabled: bool);
    /// Drop keyboard focus from the input.
    fn blur(&self);
}

/// The region showing the heading and the collapsible forecast list.
pub trait ForecastDisplay {
    fn set_heading(&self, heading: &str);
    /// Swap the whole list for `days`, in order, in one go; nothing from the
    /// previous content may survive. Markup is the host's business
    /// (see `view::to_html` / `view::to_text`).
    fn replace_content(&self, days: &[DayView]);
    fn open_entry(&self, index: usize);
}

/// Transient notifications ("toasts").
pub trait Notifier {
    fn notify(&self, message: &str, duration: Duration);
}

/// Side navigation menu, initialised once at startup.
pub trait NavigationDrawer {
    fn init(&self);
}

/// The UI collaborators, built once at startup and handed to the controller.
pub struct Surface<'a> {
    pub form: &'a dyn SearchForm,
    pub display: &'a dyn ForecastDisplay,
    pub notifier: &'a dyn Notifier,
    pub drawer: &'a dyn NavigationDrawer,
}
