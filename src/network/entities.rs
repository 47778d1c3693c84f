use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::shared::{Color, Coordinate, Time};

/// A transit operator. Rows of the agency table sharing one display name
/// resolve to a single entity; every row identifier keeps pointing at it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Agency {
    /// The global internal index used for O(1) array lookups in the network.
    pub index: u32,
    /// Identifier of the first row that introduced this agency.
    pub id: Arc<str>,
    /// The display name of the operator.
    pub name: Arc<str>,
    /// Indices of the [`Line`]s run by this agency, in discovery order.
    pub lines: Vec<u32>,
}

/// A physical location where passengers board or alight. A station with a
/// parent is a platform; trips always resolve to the topmost ancestor.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Station {
    /// The global internal index for this station.
    pub index: u32,
    /// Unique external identifier.
    pub id: Arc<str>,
    /// Human-readable name (e.g., "S Ostkreuz Bhf").
    pub name: Arc<str>,
    pub coordinate: Coordinate,
    /// Index of the parent station, present on platforms only.
    pub parent_idx: Option<u32>,
}

/// A calendar entry deciding on which dates its trips operate.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Service {
    pub index: u32,
    pub id: Arc<str>,
    /// First date of the weekly pattern, inclusive.
    pub start: NaiveDate,
    /// Last date of the weekly pattern, inclusive.
    pub end: NaiveDate,
    /// Weekday availability, Monday first.
    pub weekdays: [bool; 7],
    /// Dates running in addition to the weekly pattern.
    pub added: HashSet<NaiveDate>,
    /// Dates withdrawn from service. Removal beats every other rule.
    pub removed: HashSet<NaiveDate>,
}

impl Service {
    /// Whether trips on this service run at the given date.
    pub fn available_at(&self, date: NaiveDate) -> bool {
        if self.removed.contains(&date) {
            return false;
        }
        if self.added.contains(&date) {
            return true;
        }
        let weekday = date.weekday().num_days_from_monday() as usize;
        self.weekdays[weekday] && self.start <= date && date <= self.end
    }
}

/// Classification of the vehicle serving a line, from the extended GTFS
/// route type codes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Railway,
    #[default]
    SuburbanRailway,
    UrbanRailway,
    Bus,
    Tram,
    WaterTransport,
    /// Any code this crate does not need to distinguish.
    Other(u16),
}

impl Mode {
    pub fn from_code(code: u16) -> Self {
        match code {
            100 => Self::Railway,
            109 => Self::SuburbanRailway,
            400 => Self::UrbanRailway,
            3 | 700 => Self::Bus,
            900 => Self::Tram,
            1000 => Self::WaterTransport,
            code => Self::Other(code),
        }
    }

    /// Rail-like modes, the only ones the color table applies to.
    pub fn is_railway(&self) -> bool {
        matches!(
            self,
            Self::Railway | Self::SuburbanRailway | Self::UrbanRailway
        )
    }
}

/// A named service displayed to riders (e.g., "S1"). Route rows sharing
/// agency, short name and mode merge into a single line.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Line {
    pub index: u32,
    /// Pointer to the operating [`Agency`].
    pub agency_idx: u32,
    /// The rider-facing short name.
    pub name: Arc<str>,
    pub mode: Mode,
    /// Brand color from the color table, rail-like lines only.
    pub color: Option<Color>,
    /// Indices of the distinct [`Route`]s of this line, in creation order.
    pub routes: Vec<u32>,
}

/// One physical path of a line.
///
/// Every trip of a route follows the *exact same station sequence*,
/// either forwards or backwards.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Internal index of this route.
    pub index: u32,
    /// Pointer back to the parent [`Line`].
    pub line_idx: u32,
    /// Topmost-ancestor station indices in the travel order of the first
    /// trip that introduced this route.
    pub stations: Arc<[u32]>,
    /// List of trip indices that follow this station sequence.
    pub trips: Vec<u32>,
}

/// Scheduled call of a trip at one station.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct StopTime {
    /// Scheduled arrival time (stored as seconds since midnight).
    pub arrival: Time,
    /// Scheduled departure time (stored as seconds since midnight).
    pub departure: Time,
}

/// A specific journey taken by a vehicle along a route.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub index: u32,
    pub id: Arc<str>,
    /// Pointer to the parent [`Route`].
    pub route_idx: u32,
    /// Pointer to the [`Service`] deciding when this trip runs.
    pub service_idx: u32,
    /// Set when the trip travels its route's station sequence backwards.
    pub reversed: bool,
    /// Calls in travel order of this trip.
    pub stop_times: Box<[StopTime]>,
}

#[cfg(test)]
fn mondays_2023() -> Service {
    Service {
        index: 0,
        id: "wk".into(),
        start: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        weekdays: [true, false, false, false, false, false, false],
        added: HashSet::new(),
        removed: HashSet::new(),
    }
}

#[test]
fn available_weekday_test() {
    let service = mondays_2023();
    let monday = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
    assert!(service.available_at(monday));
    assert!(!service.available_at(tuesday));
}

#[test]
fn available_outside_range_test() {
    let service = mondays_2023();
    let monday_after_end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert!(!service.available_at(monday_after_end));
}

#[test]
fn available_added_date_test() {
    let mut service = mondays_2023();
    let tuesday = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
    let saturday_after_end = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
    service.added.insert(tuesday);
    service.added.insert(saturday_after_end);
    assert!(service.available_at(tuesday));
    assert!(service.available_at(saturday_after_end));
}

#[test]
fn available_removed_date_wins_test() {
    let mut service = mondays_2023();
    let monday = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    service.added.insert(monday);
    service.removed.insert(monday);
    assert!(!service.available_at(monday));
}

#[test]
fn mode_code_test() {
    assert_eq!(Mode::from_code(109), Mode::SuburbanRailway);
    assert_eq!(Mode::from_code(100), Mode::Railway);
    assert_eq!(Mode::from_code(400), Mode::UrbanRailway);
    assert_eq!(Mode::from_code(700), Mode::Bus);
    assert_eq!(Mode::from_code(3), Mode::Bus);
    assert_eq!(Mode::from_code(900), Mode::Tram);
    assert_eq!(Mode::from_code(1000), Mode::WaterTransport);
    assert_eq!(Mode::from_code(51), Mode::Other(51));
}

#[test]
fn railway_modes_test() {
    assert!(Mode::SuburbanRailway.is_railway());
    assert!(Mode::Railway.is_railway());
    assert!(Mode::UrbanRailway.is_railway());
    assert!(!Mode::Bus.is_railway());
    assert!(!Mode::Other(109).is_railway());
}
