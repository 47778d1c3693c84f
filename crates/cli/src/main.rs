use std::{error::Error, fs::File, io::BufWriter, path::PathBuf, time::Instant};

use clap::Parser;
use linemap::prelude::*;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "linemap",
    about = "Distill a GTFS feed into a renderable line map."
)]
struct Opt {
    /// GTFS feed, either a directory of .txt tables or a .zip archive.
    gtfs: PathBuf,

    /// Output path of the JSON line map.
    #[arg(short = 'o', long = "output", default_value = "network.json")]
    output: PathBuf,

    /// Cache the resolved network at this path and reuse it on later runs.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Rebuild the network even when a snapshot is present.
    #[arg(long)]
    refresh: bool,

    /// Display name of the operator to export.
    #[arg(long, default_value = "S-Bahn Berlin GmbH")]
    agency: String,

    /// Accepted GTFS route type codes.
    #[arg(long = "mode", default_value = "109")]
    mode: Vec<u16>,

    /// Longitude mapped to x = 0.
    #[arg(long)]
    origin_lon: Option<f64>,

    /// Latitude mapped to y = 0.
    #[arg(long)]
    origin_lat: Option<f64>,

    /// Horizontal scale in display units per degree of longitude.
    #[arg(long)]
    scale_x: Option<f64>,

    /// Vertical scale in display units per degree of latitude.
    #[arg(long)]
    scale_y: Option<f64>,
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    let projection = match (opt.origin_lat, opt.origin_lon, opt.scale_x, opt.scale_y) {
        (Some(lat), Some(lon), Some(scale_x), Some(scale_y)) => {
            Some(Projection::new(Coordinate::new(lat, lon), scale_x, scale_y))
        }
        (None, None, None, None) => None,
        _ => {
            error!("A projection needs all of --origin-lat, --origin-lon, --scale-x and --scale-y");
            std::process::exit(1);
        }
    };

    let snapshot = opt.snapshot.as_ref().map(Snapshot::new);
    let network = if !opt.refresh
        && let Some(snapshot) = &snapshot
        && let Some(network) = snapshot.load()?
    {
        info!("Reusing cached network");
        network
    } else {
        info!("Loading {}...", opt.gtfs.display());
        let now = Instant::now();
        let reader = match opt.gtfs.extension() {
            Some(ext) if ext == "zip" => GtfsReader::from_zip(&opt.gtfs),
            _ => GtfsReader::from_dir(&opt.gtfs),
        };
        let dataset = GtfsDataset::read(&reader)?;
        let network = Network::new().load_gtfs(&dataset)?;
        info!("Loading {} took {:?}", opt.gtfs.display(), now.elapsed());
        if let Some(snapshot) = &snapshot {
            snapshot.store(&network)?;
        }
        network
    };

    let options = DiagramOptions {
        agency: opt.agency,
        modes: opt.mode.iter().map(|code| Mode::from_code(*code)).collect(),
        projection,
    };
    let diagram = Diagram::build(&network, &options);

    info!("Writing {}...", opt.output.display());
    let file = File::create(&opt.output)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &diagram)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().init();
    if let Err(err) = run(Opt::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}
