//! Core library for the `meteo` forecast search.
//!
//! This crate defines:
//! - The forecast data model and the OpenWeather daily forecast client
//! - Projection of a forecast into display records, and their markup
//! - The UI capabilities a host must provide, and the `SearchController`
//!   driving search → fetch → render over them
//! - Configuration & credentials handling
//!
//! It is used by `meteo-cli`, but any host able to implement the `ui` traits
//! can drive the controller.

pub mod condition;
pub mod config;
pub mod controller;
pub mod countries;
pub mod error;
pub mod model;
pub mod provider;
pub mod ui;
pub mod view;

pub use condition::ConditionGroup;
pub use config::Config;
pub use controller::{SearchController, SearchOutcome};
pub use countries::CountryTable;
pub use error::{FailureKind, ForecastError};
pub use model::{City, DayForecast, ForecastResponse};
pub use provider::{ForecastQuery, ForecastSource, OpenWeatherClient};
pub use ui::{ForecastDisplay, NavigationDrawer, Notifier, SearchForm, Surface};
pub use view::{DayView, DetailRow, ForecastView};
