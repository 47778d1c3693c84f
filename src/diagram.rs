use std::{collections::HashMap, sync::Arc, time::Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    network::{Line, Mode, Network, Route, Station},
    shared::{Color, Projection},
};

/// Selection parameters deciding which slice of a network gets exported.
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    /// Display name of the operator whose lines are exported.
    pub agency: String,
    /// Accepted transport modes.
    pub modes: Vec<Mode>,
    /// Transform into display space. Stations keep their raw latitude and
    /// longitude when absent.
    pub projection: Option<Projection>,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            agency: "S-Bahn Berlin GmbH".into(),
            modes: vec![Mode::SuburbanRailway],
            projection: None,
        }
    }
}

/// Station position in the export, projected or geographic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Position {
    Projected { x: f64, y: f64 },
    Geographic { lat: f64, lon: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagramStation {
    pub name: Arc<str>,
    #[serde(flatten)]
    pub position: Position,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagramLine {
    pub name: Arc<str>,
    pub color: Option<Color>,
    /// Indices into the diagram's station list, in travel order.
    pub stops: Vec<u32>,
}

/// The export subset of a network: one representative route per selected
/// line over a deduplicated station list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagram {
    pub stations: Vec<DiagramStation>,
    pub lines: Vec<DiagramLine>,
}

impl Diagram {
    pub fn build(network: &Network, options: &DiagramOptions) -> Self {
        debug!("Selecting diagram subset...");
        let now = Instant::now();
        let Some(agency) = network.agency_by_name(&options.agency) else {
            warn!(
                "No agency named {:?} in the dataset, exporting nothing",
                options.agency
            );
            return Self::default();
        };

        let mut station_lookup: HashMap<u32, u32> = HashMap::new();
        let mut diagram = Self::default();
        for line_idx in &agency.lines {
            let line = &network.lines[*line_idx as usize];
            if !options.modes.contains(&line.mode) {
                continue;
            }
            let Some(route) = busiest_route(network, line) else {
                debug!("Line {} has no routes, skipping", line.name);
                continue;
            };
            let stops = route
                .stations
                .iter()
                .map(|station_idx| {
                    *station_lookup.entry(*station_idx).or_insert_with(|| {
                        let station = &network.stations[*station_idx as usize];
                        diagram.stations.push(DiagramStation {
                            name: station.name.clone(),
                            position: position_of(options, station),
                        });
                        diagram.stations.len() as u32 - 1
                    })
                })
                .collect();
            diagram.lines.push(DiagramLine {
                name: line.name.clone(),
                color: line.color,
                stops,
            });
        }

        if diagram.lines.is_empty() {
            warn!(
                "No line of {:?} matches the requested modes",
                options.agency
            );
        }
        debug!("Selecting diagram subset took {:?}", now.elapsed());
        diagram
    }
}

/// The route with the most trips wins, earlier creation wins ties.
fn busiest_route<'a>(network: &'a Network, line: &Line) -> Option<&'a Route> {
    let mut best: Option<&Route> = None;
    for route_idx in &line.routes {
        let route = &network.routes[*route_idx as usize];
        if best.is_none_or(|best| route.trips.len() > best.trips.len()) {
            best = Some(route);
        }
    }
    best
}

fn position_of(options: &DiagramOptions, station: &Station) -> Position {
    match &options.projection {
        Some(projection) => {
            let (x, y) = projection.project(station.coordinate);
            Position::Projected { x, y }
        }
        None => Position::Geographic {
            lat: station.coordinate.latitude,
            lon: station.coordinate.longitude,
        },
    }
}
