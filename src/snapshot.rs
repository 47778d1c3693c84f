use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use thiserror::Error;
use tracing::debug;

use crate::network::Network;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk cache of a resolved network, stored in the same arena form it
/// has in memory. Rebuilding from a large feed takes a while, reloading
/// the snapshot does not.
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The cached network, or None when nothing was stored yet.
    pub fn load(&self) -> Result<Option<Network>, self::Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        debug!("Loading network snapshot from {}", self.path.display());
        let network = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(network))
    }

    pub fn store(&self, network: &Network) -> Result<(), self::Error> {
        debug!("Storing network snapshot at {}", self.path.display());
        let file = File::create(&self.path)?;
        serde_json::to_writer(BufWriter::new(file), network)?;
        Ok(())
    }
}
