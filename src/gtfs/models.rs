use chrono::NaiveDate;
use serde::Deserialize;

use super::fields;

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsAgency {
    pub agency_id: String,
    pub agency_name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub parent_station: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsCalendar {
    pub service_id: String,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub monday: bool,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub tuesday: bool,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub wednesday: bool,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub thursday: bool,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub friday: bool,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub saturday: bool,
    #[serde(deserialize_with = "fields::deserialize_flag")]
    pub sunday: bool,
    #[serde(deserialize_with = "fields::deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "fields::deserialize_date")]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsCalendarDate {
    pub service_id: String,
    #[serde(deserialize_with = "fields::deserialize_date")]
    pub date: NaiveDate,
    pub exception_type: u8,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsRoute {
    pub route_id: String,
    pub agency_id: String,
    pub route_short_name: String,
    pub route_type: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsTrip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsStopTime {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GtfsLineColor {
    pub line: String,
    pub color: String,
}
