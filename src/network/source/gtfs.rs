use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Instant,
};

use tracing::debug;

use crate::{
    gtfs::{GtfsDataset, models::*},
    network::{Agency, Error, Line, Mode, Network, Route, Service, Station, StopTime, Trip},
    shared::{Color, Coordinate, Time},
};

impl Network {
    pub fn load_gtfs(mut self, dataset: &GtfsDataset) -> Result<Self, Error> {
        self.load_agencies(&dataset.agencies);
        self.load_stations(&dataset.stops)?;
        self.load_services(&dataset.calendar, &dataset.calendar_dates)?;
        self.load_lines(&dataset.routes, &dataset.colors)?;
        self.load_trips(&dataset.trips, &dataset.stop_times)?;
        Ok(self)
    }

    fn load_agencies(&mut self, rows: &[GtfsAgency]) {
        debug!("Loading agencies...");
        let now = Instant::now();
        let mut agency_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut name_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut agencies: Vec<Agency> = Vec::new();
        for row in rows {
            let name: Arc<str> = row.agency_name.as_str().into();
            let index = match name_lookup.get(&name) {
                Some(index) => *index,
                None => {
                    let index = agencies.len() as u32;
                    agencies.push(Agency {
                        index,
                        id: row.agency_id.as_str().into(),
                        name: name.clone(),
                        lines: Vec::new(),
                    });
                    name_lookup.insert(name, index);
                    index
                }
            };
            agency_lookup.insert(row.agency_id.as_str().into(), index);
        }
        self.agencies = agencies.into();
        self.agency_lookup = agency_lookup;
        debug!("Loading agencies took {:?}", now.elapsed());
    }

    fn load_stations(&mut self, rows: &[GtfsStop]) -> Result<(), Error> {
        debug!("Loading stations...");
        let now = Instant::now();
        let mut station_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut stations: Vec<Station> = Vec::new();
        let mut deferred: Vec<(&GtfsStop, &str)> = Vec::new();
        for row in rows {
            if let Some(parent) = row.parent_station.as_deref() {
                deferred.push((row, parent));
                continue;
            }
            let value = Station {
                index: stations.len() as u32,
                id: row.stop_id.as_str().into(),
                name: row.stop_name.as_str().into(),
                coordinate: Coordinate::new(row.stop_lat, row.stop_lon),
                parent_idx: None,
            };
            if station_lookup.insert(value.id.clone(), value.index).is_some() {
                return Err(Error::DuplicateStop(row.stop_id.clone()));
            }
            stations.push(value);
        }

        // Stations of the first pass are the only valid parents, a
        // platform can not parent another platform.
        let mut parents: Vec<u32> = Vec::with_capacity(deferred.len());
        for (row, parent) in &deferred {
            match station_lookup.get(*parent) {
                Some(parent_index) => parents.push(*parent_index),
                None => {
                    return Err(Error::UnknownParentStation {
                        stop: row.stop_id.clone(),
                        parent: (*parent).to_string(),
                    });
                }
            }
        }
        for ((row, _), parent_index) in deferred.iter().zip(parents) {
            let value = Station {
                index: stations.len() as u32,
                id: row.stop_id.as_str().into(),
                name: row.stop_name.as_str().into(),
                coordinate: Coordinate::new(row.stop_lat, row.stop_lon),
                parent_idx: Some(parent_index),
            };
            if station_lookup.insert(value.id.clone(), value.index).is_some() {
                return Err(Error::DuplicateStop(row.stop_id.clone()));
            }
            stations.push(value);
        }

        self.stations = stations.into();
        self.station_lookup = station_lookup;
        debug!("Loading stations took {:?}", now.elapsed());
        Ok(())
    }

    fn load_services(
        &mut self,
        calendar: &[GtfsCalendar],
        exceptions: &[GtfsCalendarDate],
    ) -> Result<(), Error> {
        debug!("Loading services...");
        let now = Instant::now();
        let mut service_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut services: Vec<Service> = Vec::new();
        for row in calendar {
            let value = Service {
                index: services.len() as u32,
                id: row.service_id.as_str().into(),
                start: row.start_date,
                end: row.end_date,
                weekdays: [
                    row.monday,
                    row.tuesday,
                    row.wednesday,
                    row.thursday,
                    row.friday,
                    row.saturday,
                    row.sunday,
                ],
                added: HashSet::new(),
                removed: HashSet::new(),
            };
            service_lookup.insert(value.id.clone(), value.index);
            services.push(value);
        }

        for row in exceptions {
            let Some(index) = service_lookup.get(row.service_id.as_str()) else {
                return Err(Error::UnknownExceptionService(row.service_id.clone()));
            };
            let service = &mut services[*index as usize];
            match row.exception_type {
                1 => {
                    service.added.insert(row.date);
                }
                2 => {
                    service.removed.insert(row.date);
                }
                value => {
                    return Err(Error::InvalidExceptionType {
                        service: row.service_id.clone(),
                        value,
                    });
                }
            }
        }

        self.services = services.into();
        self.service_lookup = service_lookup;
        debug!("Loading services took {:?}", now.elapsed());
        Ok(())
    }

    fn load_lines(&mut self, rows: &[GtfsRoute], colors: &[GtfsLineColor]) -> Result<(), Error> {
        debug!("Loading lines...");
        let now = Instant::now();
        let mut route_to_line: HashMap<Arc<str>, u32> = HashMap::new();
        let mut key_lookup: HashMap<(u32, Arc<str>, Mode), u32> = HashMap::new();
        let mut lines: Vec<Line> = Vec::new();
        for row in rows {
            let Some(agency_idx) = self.agency_lookup.get(row.agency_id.as_str()).copied() else {
                return Err(Error::UnknownAgency {
                    route: row.route_id.clone(),
                    agency: row.agency_id.clone(),
                });
            };
            let name: Arc<str> = row.route_short_name.as_str().into();
            let mode = Mode::from_code(row.route_type);
            let index = match key_lookup.get(&(agency_idx, name.clone(), mode)) {
                Some(index) => *index,
                None => {
                    let index = lines.len() as u32;
                    lines.push(Line {
                        index,
                        agency_idx,
                        name: name.clone(),
                        mode,
                        color: None,
                        routes: Vec::new(),
                    });
                    key_lookup.insert((agency_idx, name, mode), index);
                    self.agencies[agency_idx as usize].lines.push(index);
                    index
                }
            };
            route_to_line.insert(row.route_id.as_str().into(), index);
        }

        // Brand colors belong to rider facing line names, and only rail
        // services carry them.
        let mut color_lookup: HashMap<&str, Color> = HashMap::new();
        for row in colors {
            let Some(color) = Color::from_hex(&row.color) else {
                return Err(Error::InvalidColor {
                    line: row.line.clone(),
                    value: row.color.clone(),
                });
            };
            color_lookup.insert(row.line.as_str(), color);
        }
        for line in &mut lines {
            if line.mode.is_railway() {
                line.color = color_lookup.get(&*line.name).copied();
            }
        }

        self.lines = lines.into();
        self.route_to_line = route_to_line;
        debug!("Loading lines took {:?}", now.elapsed());
        Ok(())
    }

    fn load_trips(&mut self, rows: &[GtfsTrip], stop_times: &[GtfsStopTime]) -> Result<(), Error> {
        debug!("Loading routes and trips...");
        let now = Instant::now();

        let trip_ids: HashSet<&str> = rows.iter().map(|row| row.trip_id.as_str()).collect();
        let mut calls_lookup: HashMap<&str, Vec<&GtfsStopTime>> = HashMap::new();
        for stop_time in stop_times {
            if !trip_ids.contains(stop_time.trip_id.as_str()) {
                return Err(Error::UnknownTrip(stop_time.trip_id.clone()));
            }
            calls_lookup
                .entry(stop_time.trip_id.as_str())
                .or_default()
                .push(stop_time);
        }
        for calls in calls_lookup.values_mut() {
            calls.sort_by_key(|call| call.stop_sequence);
        }

        let mut routes: Vec<Route> = Vec::new();
        let mut trips: Vec<Trip> = Vec::new();
        for row in rows {
            let Some(line_idx) = self.route_to_line.get(row.route_id.as_str()).copied() else {
                return Err(Error::UnknownRoute {
                    trip: row.trip_id.clone(),
                    route: row.route_id.clone(),
                });
            };
            let Some(service_idx) = self.service_lookup.get(row.service_id.as_str()).copied()
            else {
                return Err(Error::UnknownService {
                    trip: row.trip_id.clone(),
                    service: row.service_id.clone(),
                });
            };

            let calls = calls_lookup
                .get(row.trip_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let mut signature: Vec<u32> = Vec::with_capacity(calls.len());
            let mut times: Vec<StopTime> = Vec::with_capacity(calls.len());
            for call in calls {
                let Some(stop_idx) = self.station_lookup.get(call.stop_id.as_str()).copied()
                else {
                    return Err(Error::UnknownStop {
                        trip: row.trip_id.clone(),
                        stop: call.stop_id.clone(),
                    });
                };
                signature.push(self.station_of(stop_idx));
                times.push(StopTime {
                    arrival: parse_time(&row.trip_id, &call.arrival_time)?,
                    departure: parse_time(&row.trip_id, &call.departure_time)?,
                });
            }

            // A trip joins the first route of its line running the same
            // stations, either in travel order or exactly backwards.
            let line = &self.lines[line_idx as usize];
            let mut found: Option<(u32, bool)> = None;
            for route_idx in &line.routes {
                let route = &routes[*route_idx as usize];
                if route.stations[..] == signature[..] {
                    found = Some((*route_idx, false));
                    break;
                }
                if route.stations.iter().rev().eq(signature.iter()) {
                    found = Some((*route_idx, true));
                    break;
                }
            }
            let (route_idx, reversed) = match found {
                Some(found) => found,
                None => {
                    let index = routes.len() as u32;
                    routes.push(Route {
                        index,
                        line_idx,
                        stations: signature.into(),
                        trips: Vec::new(),
                    });
                    self.lines[line_idx as usize].routes.push(index);
                    (index, false)
                }
            };

            let value = Trip {
                index: trips.len() as u32,
                id: row.trip_id.as_str().into(),
                route_idx,
                service_idx,
                reversed,
                stop_times: times.into(),
            };
            routes[route_idx as usize].trips.push(value.index);
            trips.push(value);
        }

        self.routes = routes.into();
        self.trips = trips.into();
        debug!("Loading routes and trips took {:?}", now.elapsed());
        Ok(())
    }
}

fn parse_time(trip_id: &str, value: &str) -> Result<Time, Error> {
    Time::from_hms(value).ok_or_else(|| Error::InvalidTime {
        trip: trip_id.to_string(),
        value: value.to_string(),
    })
}
