use std::time::Instant;
use tracing::debug;

use super::{Error, GtfsReader, models::*};

/// Every raw table of one feed, read in a single pass. The color table
/// is an extension not every feed carries, so it may stay empty.
#[derive(Debug, Default, Clone)]
pub struct GtfsDataset {
    pub agencies: Vec<GtfsAgency>,
    pub stops: Vec<GtfsStop>,
    pub calendar: Vec<GtfsCalendar>,
    pub calendar_dates: Vec<GtfsCalendarDate>,
    pub routes: Vec<GtfsRoute>,
    pub trips: Vec<GtfsTrip>,
    pub stop_times: Vec<GtfsStopTime>,
    pub colors: Vec<GtfsLineColor>,
}

impl GtfsDataset {
    pub fn read(reader: &GtfsReader) -> Result<Self, Error> {
        debug!("Reading GTFS tables...");
        let now = Instant::now();
        let colors = match reader.read_colors() {
            Ok(colors) => colors,
            Err(Error::FileNotFound(name)) => {
                debug!("Feed has no {name}, lines stay uncolored");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        let dataset = Self {
            agencies: reader.read_agencies()?,
            stops: reader.read_stops()?,
            calendar: reader.read_calendar()?,
            calendar_dates: reader.read_calendar_dates()?,
            routes: reader.read_routes()?,
            trips: reader.read_trips()?,
            stop_times: reader.read_stop_times()?,
            colors,
        };
        debug!("Reading GTFS tables took {:?}", now.elapsed());
        Ok(dataset)
    }
}
