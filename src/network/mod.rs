use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod entities;
mod source;
pub use entities::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Stop {stop} references unknown parent station {parent}")]
    UnknownParentStation { stop: String, parent: String },
    #[error("Stop identifier {0} appears twice")]
    DuplicateStop(String),
    #[error("Calendar exception references unknown service {0}")]
    UnknownExceptionService(String),
    #[error("Exception type {value} for service {service} is not 1 or 2")]
    InvalidExceptionType { service: String, value: u8 },
    #[error("Route {route} references unknown agency {agency}")]
    UnknownAgency { route: String, agency: String },
    #[error("Color {value} of line {line} is not a #rrggbb value")]
    InvalidColor { line: String, value: String },
    #[error("Stop time references unknown trip {0}")]
    UnknownTrip(String),
    #[error("Trip {trip} references unknown route {route}")]
    UnknownRoute { trip: String, route: String },
    #[error("Trip {trip} references unknown service {service}")]
    UnknownService { trip: String, service: String },
    #[error("Trip {trip} calls at unknown stop {stop}")]
    UnknownStop { trip: String, stop: String },
    #[error("Time {value} in trip {trip} is not an HH:MM:SS value")]
    InvalidTime { trip: String, value: String },
}

type IdToIndex = HashMap<Arc<str>, u32>;

/// The resolved transit network in arena form. Entities point at each
/// other by index into the sibling arenas; external identifiers resolve
/// through the lookup maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    pub agencies: Box<[Agency]>,
    pub stations: Box<[Station]>,
    pub services: Box<[Service]>,
    pub lines: Box<[Line]>,
    pub routes: Box<[Route]>,
    pub trips: Box<[Trip]>,

    // GTFS lookup
    station_lookup: IdToIndex,
    service_lookup: IdToIndex,
    agency_lookup: IdToIndex,
    route_to_line: IdToIndex,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    /// Index of the topmost ancestor of a station. Parents never have
    /// parents themselves, so the walk is at most one step on resolved
    /// data and always terminates.
    pub fn station_of(&self, index: u32) -> u32 {
        let mut current = index;
        while let Some(parent) = self.stations[current as usize].parent_idx {
            current = parent;
        }
        current
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let station_index = self.station_lookup.get(id)?;
        Some(&self.stations[*station_index as usize])
    }

    pub fn service_by_id(&self, id: &str) -> Option<&Service> {
        let service_index = self.service_lookup.get(id)?;
        Some(&self.services[*service_index as usize])
    }

    pub fn agency_by_id(&self, id: &str) -> Option<&Agency> {
        let agency_index = self.agency_lookup.get(id)?;
        Some(&self.agencies[*agency_index as usize])
    }

    /// Get an agency with the given display name.
    /// If no agency carries the name None is returned.
    pub fn agency_by_name(&self, name: &str) -> Option<&Agency> {
        self.agencies.iter().find(|agency| &*agency.name == name)
    }

    /// The line a raw GTFS route identifier was merged into.
    pub fn line_by_route_id(&self, route_id: &str) -> Option<&Line> {
        let line_index = self.route_to_line.get(route_id)?;
        Some(&self.lines[*line_index as usize])
    }
}

#[test]
fn station_of_test() {
    let mut network = Network::new();
    network.stations = vec![
        Station {
            index: 0,
            id: "st".into(),
            name: "Central".into(),
            ..Default::default()
        },
        Station {
            index: 1,
            id: "p1".into(),
            name: "Central Platform 1".into(),
            parent_idx: Some(0),
            ..Default::default()
        },
    ]
    .into();
    assert_eq!(network.station_of(1), 0);
    assert_eq!(network.station_of(0), 0);
    assert_eq!(network.station_of(network.station_of(1)), network.station_of(1));
}
