use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

mod config;
mod dataset;
mod fields;
pub mod models;
pub use config::*;
pub use dataset::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

pub enum StorageType {
    Directory(PathBuf),
    Zip(PathBuf),
}

/// Reads the raw tables of one GTFS feed, either from an extracted
/// directory or straight out of the zip archive.
pub struct GtfsReader {
    config: Config,
    storage: StorageType,
}

impl GtfsReader {
    pub fn from_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Default::default(),
            storage: StorageType::Directory(path.into()),
        }
    }

    pub fn from_zip(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Default::default(),
            storage: StorageType::Zip(path.into()),
        }
    }

    pub fn with_config(mut self, config: self::Config) -> Self {
        self.config = config;
        self
    }

    pub fn read_agencies(&self) -> Result<Vec<GtfsAgency>, self::Error> {
        self.read_table(&self.config.agency_path)
    }

    pub fn read_stops(&self) -> Result<Vec<GtfsStop>, self::Error> {
        self.read_table(&self.config.stops_path)
    }

    pub fn read_calendar(&self) -> Result<Vec<GtfsCalendar>, self::Error> {
        self.read_table(&self.config.calendar_path)
    }

    pub fn read_calendar_dates(&self) -> Result<Vec<GtfsCalendarDate>, self::Error> {
        self.read_table(&self.config.calendar_dates_path)
    }

    pub fn read_routes(&self) -> Result<Vec<GtfsRoute>, self::Error> {
        self.read_table(&self.config.routes_path)
    }

    pub fn read_trips(&self) -> Result<Vec<GtfsTrip>, self::Error> {
        self.read_table(&self.config.trips_path)
    }

    pub fn read_stop_times(&self) -> Result<Vec<GtfsStopTime>, self::Error> {
        self.read_table(&self.config.stop_times_path)
    }

    pub fn read_colors(&self) -> Result<Vec<GtfsLineColor>, self::Error> {
        self.read_table(&self.config.colors_path)
    }

    fn read_table<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, self::Error> {
        match &self.storage {
            StorageType::Directory(path) => {
                let file = match File::open(path.join(file_name)) {
                    Ok(file) => file,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {
                        return Err(self::Error::FileNotFound(file_name.to_string()));
                    }
                    Err(err) => return Err(err.into()),
                };
                parse_csv(file)
            }
            StorageType::Zip(path) => {
                let zip_file = File::open(path)?;
                let mut archive = ZipArchive::new(zip_file)?;
                let file = get_file(&mut archive, file_name)?;
                parse_csv(file)
            }
        }
    }
}

fn parse_csv<T, R>(reader: R) -> Result<Vec<T>, self::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
