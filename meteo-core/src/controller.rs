//! The search pipeline: guard, fetch, classify, render.

use std::{cell::Cell, time::Duration};

use tracing::instrument;

use crate::{
    CountryTable, FailureKind, ForecastError, ForecastResponse,
    provider::{ForecastQuery, ForecastSource},
    ui::Surface,
    view,
};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(4000);

/// What a call to [`SearchController::search`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Another request was already in flight; nothing happened.
    Skipped,
    Rendered { days: usize },
    Failed(FailureKind),
}

pub struct SearchController<'a> {
    source: Box<dyn ForecastSource + 'a>,
    surface: Surface<'a>,
    countries: &'static CountryTable,
    api_key: String,
    toast_duration: Duration,
    request_in_progress: Cell<bool>,
}

impl<'a> SearchController<'a> {
    /// Wire the controller and initialise the navigation drawer.
    pub fn new(
        source: Box<dyn ForecastSource + 'a>,
        surface: Surface<'a>,
        api_key: impl Into<String>,
    ) -> Self {
        surface.drawer.init();

        Self {
            source,
            surface,
            countries: CountryTable::global(),
            api_key: api_key.into(),
            toast_duration: DEFAULT_TOAST_DURATION,
            request_in_progress: Cell::new(false),
        }
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    pub fn with_countries(mut self, countries: &'static CountryTable) -> Self {
        self.countries = countries;
        self
    }

    pub fn is_request_in_progress(&self) -> bool {
        self.request_in_progress.get()
    }

    /// Search for the city currently typed in the form.
    ///
    /// At most one search runs at a time: calling this while a request is
    /// pending returns [`SearchOutcome::Skipped`] without touching anything.
    #[instrument(skip(self))]
    pub async fn search(&self) -> SearchOutcome {
        let Some(_in_flight) = InFlight::begin(self) else {
            tracing::debug!("search ignored, request already in progress");
            return SearchOutcome::Skipped;
        };

        let query = ForecastQuery::new(&self.surface.form.value(), &self.api_key);

        match self.source.fetch(&query).await {
            Ok(response) => {
                self.render(&response);
                self.surface.form.blur();
                SearchOutcome::Rendered { days: response.days.len() }
            }
            Err(err) => self.report(&err),
        }
    }

    /// Put `city` in the input, then search as if the user had submitted it.
    pub async fn set_search_and_go(&self, city: &str) -> SearchOutcome {
        self.surface.form.set_value(city);
        self.search().await
    }

    /// Replace the displayed forecast with `response` and open the first day.
    pub fn render(&self, response: &ForecastResponse) {
        let view = view::project(response, self.countries);

        self.surface.display.set_heading(&view.heading);
        self.surface.display.replace_content(&view.days);

        if !view.days.is_empty() {
            self.surface.display.open_entry(0);
        }
    }

    fn report(&self, err: &ForecastError) -> SearchOutcome {
        let kind = err.kind();
        match kind {
            FailureKind::CityNotFound => tracing::info!("city not found"),
            FailureKind::RequestFailed => tracing::warn!(error = %err, "forecast request failed"),
        }

        self.surface.notifier.notify(kind.user_message(), self.toast_duration);
        SearchOutcome::Failed(kind)
    }
}

/// Marks a request as in flight for as long as it lives. Dropping it, on any
/// path including unwinding, re-enables submit and clears the flag.
struct InFlight<'c, 'a> {
    controller: &'c SearchController<'a>,
}

impl<'c, 'a> InFlight<'c, 'a> {
    fn begin(controller: &'c SearchController<'a>) -> Option<Self> {
        if controller.request_in_progress.replace(true) {
            return None;
        }
        controller.surface.form.set_submit_enabled(false);
        Some(Self { controller })
    }
}

impl Drop for InFlight<'_, '_> {
    fn drop(&mut self) {
        self.controller.surface.form.set_submit_enabled(true);
        self.controller.request_in_progress.set(false);
    }
}
