use chrono::NaiveDate;
use linemap::{
    gtfs::{GtfsDataset, models::*},
    network::{self, Network},
    shared::{Color, Time},
};

fn agency(id: &str, name: &str) -> GtfsAgency {
    GtfsAgency {
        agency_id: id.into(),
        agency_name: name.into(),
    }
}

fn stop(id: &str, name: &str, parent: Option<&str>) -> GtfsStop {
    GtfsStop {
        stop_id: id.into(),
        stop_name: name.into(),
        stop_lat: 52.5,
        stop_lon: 13.4,
        parent_station: parent.map(str::to_string),
    }
}

fn calendar(id: &str) -> GtfsCalendar {
    GtfsCalendar {
        service_id: id.into(),
        monday: true,
        tuesday: true,
        wednesday: true,
        thursday: true,
        friday: true,
        saturday: false,
        sunday: false,
        start_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    }
}

fn exception(id: &str, date: (i32, u32, u32), exception_type: u8) -> GtfsCalendarDate {
    GtfsCalendarDate {
        service_id: id.into(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        exception_type,
    }
}

fn route(id: &str, agency: &str, name: &str, mode: u16) -> GtfsRoute {
    GtfsRoute {
        route_id: id.into(),
        agency_id: agency.into(),
        route_short_name: name.into(),
        route_type: mode,
    }
}

fn trip(id: &str, route: &str, service: &str) -> GtfsTrip {
    GtfsTrip {
        route_id: route.into(),
        service_id: service.into(),
        trip_id: id.into(),
    }
}

fn call(trip: &str, stop: &str, sequence: u32, time: &str) -> GtfsStopTime {
    GtfsStopTime {
        trip_id: trip.into(),
        arrival_time: time.into(),
        departure_time: time.into(),
        stop_id: stop.into(),
        stop_sequence: sequence,
    }
}

fn base_dataset() -> GtfsDataset {
    GtfsDataset {
        agencies: vec![agency("1", "S-Bahn Berlin GmbH")],
        stops: vec![
            stop("a", "Alpha", None),
            stop("b", "Beta", None),
            stop("c", "Gamma", None),
            stop("d", "Delta", None),
        ],
        calendar: vec![calendar("daily")],
        routes: vec![route("r1", "1", "S1", 109)],
        ..Default::default()
    }
}

#[test]
fn station_hierarchy_test() {
    let mut dataset = base_dataset();
    dataset.stops = vec![
        stop("p1", "Ostkreuz Gleis 1", Some("st")),
        stop("st", "Ostkreuz", None),
        stop("p2", "Ostkreuz Gleis 2", Some("st")),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    let station = network.station_by_id("st").unwrap().index;
    let platform = network.station_by_id("p1").unwrap().index;
    assert_eq!(network.station_of(platform), station);
    assert_eq!(network.station_of(station), station);
    assert_eq!(
        network.station_by_id("p2").unwrap().parent_idx,
        Some(station)
    );
}

#[test]
fn unknown_parent_test() {
    let mut dataset = base_dataset();
    dataset.stops.push(stop("p9", "Ghost Platform", Some("ghost")));
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownParentStation { .. })
    ));
}

#[test]
fn nested_platform_test() {
    let mut dataset = base_dataset();
    dataset.stops = vec![
        stop("st", "Root", None),
        stop("mid", "Middle", Some("st")),
        stop("leaf", "Leaf", Some("mid")),
    ];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownParentStation { .. })
    ));
}

#[test]
fn duplicate_stop_test() {
    let mut dataset = base_dataset();
    dataset.stops.push(stop("a", "Alpha again", None));
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::DuplicateStop(_))
    ));
}

#[test]
fn service_availability_test() {
    let mut dataset = base_dataset();
    dataset.calendar_dates = vec![
        exception("daily", (2023, 1, 9), 2),
        exception("daily", (2023, 1, 7), 1),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    let service = network.service_by_id("daily").unwrap();
    let removed_monday = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let added_saturday = NaiveDate::from_ymd_opt(2023, 1, 7).unwrap();
    let plain_monday = NaiveDate::from_ymd_opt(2023, 1, 16).unwrap();
    assert!(!service.available_at(removed_monday));
    assert!(service.available_at(added_saturday));
    assert!(service.available_at(plain_monday));
}

#[test]
fn removal_wins_test() {
    let mut dataset = base_dataset();
    dataset.calendar_dates = vec![
        exception("daily", (2023, 6, 14), 1),
        exception("daily", (2023, 6, 14), 2),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    let service = network.service_by_id("daily").unwrap();
    let date = NaiveDate::from_ymd_opt(2023, 6, 14).unwrap();
    assert!(!service.available_at(date));
}

#[test]
fn repeated_exception_test() {
    let mut dataset = base_dataset();
    dataset.calendar_dates = vec![
        exception("daily", (2023, 1, 9), 2),
        exception("daily", (2023, 1, 9), 2),
        exception("daily", (2023, 1, 7), 1),
        exception("daily", (2023, 1, 7), 1),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    let service = network.service_by_id("daily").unwrap();
    assert_eq!(service.removed.len(), 1);
    assert_eq!(service.added.len(), 1);
    assert!(!service.available_at(NaiveDate::from_ymd_opt(2023, 1, 9).unwrap()));
    assert!(service.available_at(NaiveDate::from_ymd_opt(2023, 1, 7).unwrap()));
}

#[test]
fn unknown_exception_service_test() {
    let mut dataset = base_dataset();
    dataset.calendar_dates = vec![exception("ghost", (2023, 1, 9), 2)];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownExceptionService(_))
    ));
}

#[test]
fn invalid_exception_type_test() {
    let mut dataset = base_dataset();
    dataset.calendar_dates = vec![exception("daily", (2023, 1, 9), 3)];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::InvalidExceptionType { value: 3, .. })
    ));
}

#[test]
fn line_interning_test() {
    let mut dataset = base_dataset();
    dataset.routes = vec![
        route("r1", "1", "S1", 109),
        route("r2", "1", "S1", 109),
        route("r3", "1", "S1", 700),
        route("r4", "1", "S2", 109),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(network.lines.len(), 3);
    let first = network.line_by_route_id("r1").unwrap().index;
    let second = network.line_by_route_id("r2").unwrap().index;
    assert_eq!(first, second);
    assert_ne!(network.line_by_route_id("r3").unwrap().index, first);
    assert_ne!(network.line_by_route_id("r4").unwrap().index, first);
}

#[test]
fn agency_name_merge_test() {
    let mut dataset = base_dataset();
    dataset.agencies = vec![
        agency("1", "S-Bahn Berlin GmbH"),
        agency("2", "S-Bahn Berlin GmbH"),
        agency("3", "BVG"),
    ];
    dataset.routes = vec![route("r1", "1", "S1", 109), route("r2", "2", "S1", 109)];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(network.agencies.len(), 2);
    assert_eq!(network.lines.len(), 1);
    assert_eq!(
        network.agency_by_id("1").unwrap().index,
        network.agency_by_id("2").unwrap().index
    );
    assert_eq!(
        network.line_by_route_id("r1").unwrap().index,
        network.line_by_route_id("r2").unwrap().index
    );
}

#[test]
fn unknown_agency_test() {
    let mut dataset = base_dataset();
    dataset.routes = vec![route("r1", "9", "S1", 109)];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownAgency { .. })
    ));
}

#[test]
fn line_color_test() {
    let mut dataset = base_dataset();
    dataset.routes = vec![
        route("r1", "1", "S1", 109),
        route("r2", "1", "S1", 700),
        route("r3", "1", "S9", 109),
    ];
    dataset.colors = vec![GtfsLineColor {
        line: "S1".into(),
        color: "#0066ad".into(),
    }];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(
        network.line_by_route_id("r1").unwrap().color,
        Some(Color::new(0x00, 0x66, 0xad))
    );
    assert_eq!(network.line_by_route_id("r2").unwrap().color, None);
    assert_eq!(network.line_by_route_id("r3").unwrap().color, None);
}

#[test]
fn invalid_color_test() {
    let mut dataset = base_dataset();
    dataset.colors = vec![GtfsLineColor {
        line: "S1".into(),
        color: "0066ad".into(),
    }];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::InvalidColor { .. })
    ));
}

#[test]
fn route_reversal_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily"), trip("t2", "r1", "daily")];
    dataset.stop_times = vec![
        call("t1", "a", 1, "08:00:00"),
        call("t1", "b", 2, "08:05:00"),
        call("t1", "c", 3, "08:10:00"),
        call("t2", "c", 1, "09:00:00"),
        call("t2", "b", 2, "09:05:00"),
        call("t2", "a", 3, "09:10:00"),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(network.routes.len(), 1);
    let first = &network.trips[0];
    let second = &network.trips[1];
    assert_eq!(first.route_idx, second.route_idx);
    assert!(!first.reversed);
    assert!(second.reversed);
    assert_eq!(network.routes[0].trips, vec![0, 1]);
    assert_eq!(
        first.service_idx,
        network.service_by_id("daily").unwrap().index
    );
}

#[test]
fn route_split_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily"), trip("t2", "r1", "daily")];
    dataset.stop_times = vec![
        call("t1", "a", 1, "08:00:00"),
        call("t1", "b", 2, "08:05:00"),
        call("t2", "a", 1, "09:00:00"),
        call("t2", "d", 2, "09:05:00"),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(network.routes.len(), 2);
    assert_ne!(network.trips[0].route_idx, network.trips[1].route_idx);
    assert_eq!(network.line_by_route_id("r1").unwrap().routes.len(), 2);
}

#[test]
fn platform_identity_test() {
    let mut dataset = base_dataset();
    dataset.stops = vec![
        stop("st", "Ostkreuz", None),
        stop("b", "Beta", None),
        stop("p1", "Gleis 1", Some("st")),
        stop("p2", "Gleis 2", Some("st")),
    ];
    dataset.trips = vec![trip("t1", "r1", "daily"), trip("t2", "r1", "daily")];
    dataset.stop_times = vec![
        call("t1", "p1", 1, "08:00:00"),
        call("t1", "b", 2, "08:05:00"),
        call("t2", "p2", 1, "09:00:00"),
        call("t2", "b", 2, "09:05:00"),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(network.routes.len(), 1);
    let station = network.station_by_id("st").unwrap().index;
    let beta = network.station_by_id("b").unwrap().index;
    assert_eq!(&network.routes[0].stations[..], &[station, beta][..]);
}

#[test]
fn stop_sequence_order_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily")];
    dataset.stop_times = vec![
        call("t1", "c", 30, "08:10:00"),
        call("t1", "a", 10, "08:00:00"),
        call("t1", "b", 20, "08:05:00"),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    let a = network.station_by_id("a").unwrap().index;
    let b = network.station_by_id("b").unwrap().index;
    let c = network.station_by_id("c").unwrap().index;
    assert_eq!(&network.routes[0].stations[..], &[a, b, c][..]);
    let first = &network.trips[0];
    assert_eq!(first.stop_times[0].arrival, Time::from_seconds(8 * 3600));
    assert_eq!(
        first.stop_times[2].arrival,
        Time::from_seconds(8 * 3600 + 600)
    );
}

#[test]
fn degenerate_trip_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![
        trip("empty1", "r1", "daily"),
        trip("empty2", "r1", "daily"),
        trip("single", "r1", "daily"),
    ];
    dataset.stop_times = vec![call("single", "a", 1, "08:00:00")];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(network.routes.len(), 2);
    assert_eq!(network.trips[0].route_idx, network.trips[1].route_idx);
    assert!(network.trips[0].stop_times.is_empty());
    assert!(!network.trips[2].reversed);
}

#[test]
fn unknown_trip_references_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "nope", "daily")];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownRoute { .. })
    ));

    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "nope")];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownService { .. })
    ));

    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily")];
    dataset.stop_times = vec![call("t1", "nope", 1, "08:00:00")];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::UnknownStop { .. })
    ));
}

#[test]
fn orphan_stop_time_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily")];
    dataset.stop_times = vec![
        call("t1", "a", 1, "08:00:00"),
        call("t1x", "b", 1, "08:00:00"),
    ];
    match Network::new().load_gtfs(&dataset) {
        Err(network::Error::UnknownTrip(id)) => assert_eq!(id, "t1x"),
        other => panic!("expected UnknownTrip, got {other:?}"),
    }
}

#[test]
fn invalid_time_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily")];
    dataset.stop_times = vec![call("t1", "a", 1, "8 o'clock")];
    assert!(matches!(
        Network::new().load_gtfs(&dataset),
        Err(network::Error::InvalidTime { .. })
    ));
}

#[test]
fn past_midnight_time_test() {
    let mut dataset = base_dataset();
    dataset.trips = vec![trip("t1", "r1", "daily")];
    dataset.stop_times = vec![
        call("t1", "a", 1, "23:59:00"),
        call("t1", "b", 2, "24:03:00"),
    ];
    let network = Network::new().load_gtfs(&dataset).unwrap();
    assert_eq!(
        network.trips[0].stop_times[1].departure,
        Time::from_seconds(24 * 3600 + 180)
    );
}
