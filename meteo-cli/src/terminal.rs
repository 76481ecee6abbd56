//! Terminal stand-ins for the widget's UI collaborators.

use std::{
    cell::{Cell, RefCell},
    io::{self, Stdout, Write},
    time::Duration,
};

use meteo_core::{
    DayView, ForecastDisplay, NavigationDrawer, Notifier, SearchForm, Surface, view,
};

/// Holds the "page" state: the search input, the heading and the day list.
/// Forecast output goes to `out`; toasts go to stderr.
#[derive(Debug)]
pub struct TerminalPage<W: Write = Stdout> {
    input: RefCell<String>,
    submit_enabled: Cell<bool>,
    heading: RefCell<String>,
    days: RefCell<Vec<DayView>>,
    suggested: Vec<String>,
    out: RefCell<W>,
}

impl TerminalPage<Stdout> {
    pub fn new(suggested: Vec<String>) -> Self {
        Self::with_writer(suggested, io::stdout())
    }
}

impl<W: Write> TerminalPage<W> {
    pub fn with_writer(suggested: Vec<String>, out: W) -> Self {
        Self {
            input: RefCell::new(String::new()),
            submit_enabled: Cell::new(true),
            heading: RefCell::new(String::new()),
            days: RefCell::new(Vec::new()),
            suggested,
            out: RefCell::new(out),
        }
    }

    pub fn surface(&self) -> Surface<'_> {
        Surface { form: self, display: self, notifier: self, drawer: self }
    }

    pub fn suggested(&self) -> &[String] {
        &self.suggested
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.get()
    }

    /// Current list as an HTML fragment.
    pub fn html(&self) -> String {
        view::to_html(&self.days.borrow())
    }

    fn emit(&self, text: &str) {
        if let Err(err) = self.out.borrow_mut().write_all(text.as_bytes()) {
            tracing::warn!(error = %err, "failed to write forecast output");
        }
    }
}

impl<W: Write> SearchForm for TerminalPage<W> {
    fn value(&self) -> String {
        self.input.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.input.borrow_mut() = value.to_string();
    }

    fn set_submit_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "submit toggled");
        self.submit_enabled.set(enabled);
    }

    fn blur(&self) {}
}

impl<W: Write> ForecastDisplay for TerminalPage<W> {
    fn set_heading(&self, heading: &str) {
        *self.heading.borrow_mut() = heading.to_string();
    }

    fn replace_content(&self, days: &[DayView]) {
        *self.days.borrow_mut() = days.to_vec();

        let listing = if days.is_empty() {
            "(aucune prévision)\n".to_string()
        } else {
            view::to_text(days, None)
        };
        self.emit(&format!("\n{}\n\n{listing}", self.heading.borrow()));
    }

    fn open_entry(&self, index: usize) {
        let days = self.days.borrow();
        if let Some(day) = days.get(index) {
            self.emit(&format!("\n{}", view::to_text(std::slice::from_ref(day), Some(0))));
        }
    }
}

impl<W: Write> Notifier for TerminalPage<W> {
    fn notify(&self, message: &str, duration: Duration) {
        tracing::debug!(?duration, "toast");
        eprintln!("\n{message}\n");
    }
}

impl<W: Write> NavigationDrawer for TerminalPage<W> {
    fn init(&self) {
        if !self.suggested.is_empty() {
            tracing::debug!(cities = ?self.suggested, "suggested cities loaded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_core::{City, CountryTable, DayForecast, ForecastResponse};

    fn page() -> TerminalPage<Vec<u8>> {
        TerminalPage::with_writer(vec![], Vec::new())
    }

    fn output(page: &TerminalPage<Vec<u8>>) -> String {
        String::from_utf8(page.out.borrow().clone()).unwrap()
    }

    fn paris(days: usize) -> ForecastResponse {
        ForecastResponse {
            city: City { name: "Paris".to_string(), country_code: "FR".to_string() },
            days: (0..days)
                .map(|i| DayForecast {
                    timestamp_seconds: 1700000000 + i as i64 * 86400,
                    condition_id: 800,
                    condition_description: "ciel dégagé".to_string(),
                    temp_min: 5.0,
                    temp_day: 10.0,
                    temp_max: 15.0,
                    humidity_percent: 60,
                    wind_speed: 3.0,
                    pressure_hpa: 1013.0,
                })
                .collect(),
        }
    }

    fn show(page: &TerminalPage<Vec<u8>>, response: &ForecastResponse) {
        let forecast = view::project(response, CountryTable::global());
        page.set_heading(&forecast.heading);
        page.replace_content(&forecast.days);
        if !forecast.days.is_empty() {
            page.open_entry(0);
        }
    }

    #[test]
    fn empty_forecast_still_prints_heading() {
        let page = page();
        show(&page, &paris(0));

        let out = output(&page);
        assert!(out.contains("Météo à Paris, France"));
        assert!(out.contains("aucune prévision"));
    }

    #[test]
    fn lists_every_day_then_expands_the_opened_one() {
        let page = page();
        show(&page, &paris(3));

        let out = output(&page);
        assert!(out.contains("Météo à Paris, France"));
        assert_eq!(out.matches("▸ ").count(), 3);
        assert_eq!(out.matches("▾ ").count(), 1);
        assert!(out.contains("60%"));
    }

    #[test]
    fn open_entry_out_of_range_prints_nothing() {
        let page = page();
        page.open_entry(4);

        assert!(output(&page).is_empty());
    }
}
