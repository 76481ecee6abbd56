//! Projection of a forecast into display records, and markup built from them.
//!
//! `project` is pure data shaping; `to_html` and `to_text` only format what it
//! produced.

use chrono::Locale;
use maud::{Markup, Render, html};

use crate::{
    ConditionGroup, CountryTable, DayForecast, ForecastResponse, condition::icon_class,
};

const DATE_FORMAT: &str = "%A %-d %B";

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub heading: String,
    pub days: Vec<DayView>,
}

/// One collapsible entry: a summary line and a detail table.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub condition_id: u32,
    pub icon_class: String,
    pub date_label: String,
    pub summary_temp: String,
    pub rows: Vec<DetailRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub icon_class: String,
    pub caption: &'static str,
    pub value: String,
}

pub fn heading(response: &ForecastResponse, countries: &CountryTable) -> String {
    format!(
        "Météo à {}, {}",
        response.city.name,
        countries.display_name(&response.city.country_code)
    )
}

pub fn project(response: &ForecastResponse, countries: &CountryTable) -> ForecastView {
    ForecastView {
        heading: heading(response, countries),
        days: response.days.iter().map(project_day).collect(),
    }
}

fn project_day(day: &DayForecast) -> DayView {
    let icon = icon_class(day.condition_id);

    let rows = vec![
        DetailRow {
            icon_class: icon.clone(),
            caption: "Météo",
            value: day.condition_description.clone(),
        },
        DetailRow {
            icon_class: "wi wi-thermometer".to_string(),
            caption: "Température",
            value: format!(
                "Minimum: {} · Moyen: {} · Maximum: {}",
                celsius(day.temp_min),
                celsius(day.temp_day),
                celsius(day.temp_max)
            ),
        },
        DetailRow {
            icon_class: "wi wi-humidity".to_string(),
            caption: "Humidité",
            value: format!("{}%", day.humidity_percent),
        },
        DetailRow {
            icon_class: "wi wi-strong-wind".to_string(),
            caption: "Vitesse du vent",
            value: format!("{} m/s", day.wind_speed),
        },
        DetailRow {
            icon_class: "wi wi-barometer".to_string(),
            caption: "Pression atmosphérique",
            value: format!("{} hPa", day.pressure_hpa),
        },
    ];

    DayView {
        condition_id: day.condition_id,
        icon_class: icon,
        date_label: date_label(day),
        summary_temp: celsius(day.temp_day),
        rows,
    }
}

fn celsius(value: f64) -> String {
    format!("{value}°C")
}

fn date_label(day: &DayForecast) -> String {
    match day.date() {
        Some(date) => date.format_localized(DATE_FORMAT, Locale::fr_FR).to_string(),
        None => {
            tracing::warn!(ts = day.timestamp_seconds, "forecast timestamp out of range");
            day.timestamp_seconds.to_string()
        }
    }
}

/// Collapsible list items for the forecast container.
pub fn to_html(days: &[DayView]) -> String {
    days.iter().map(|day| day.render().into_string()).collect::<Vec<_>>().join("\n")
}

impl Render for DayView {
    fn render(&self) -> Markup {
        html! {
            li {
                div class="collapsible-header" {
                    i class=(self.icon_class) {}
                    (self.date_label) " · " (self.summary_temp)
                }
                div class="collapsible-body" {
                    span {
                        table {
                            tbody {
                                @for row in &self.rows {
                                    (row)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Render for DetailRow {
    fn render(&self) -> Markup {
        html! {
            tr {
                td { i class=(self.icon_class) {} " " (self.caption) }
                td { (self.value) }
            }
        }
    }
}

/// Plain-text rendering. `open` marks the entry shown expanded.
pub fn to_text(days: &[DayView], open: Option<usize>) -> String {
    let mut out = String::new();

    for (i, day) in days.iter().enumerate() {
        let glyph = ConditionGroup::from_owm_id(day.condition_id).glyph();
        let marker = if open == Some(i) { '▾' } else { '▸' };
        out.push_str(&format!("{marker} {glyph} {} · {}\n", day.date_label, day.summary_temp));

        if open == Some(i) {
            for row in &day.rows {
                out.push_str(&format!("    {:<24}{}\n", row.caption, row.value));
            }
        }
    }

    out
}
