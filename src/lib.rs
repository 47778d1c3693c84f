//! Distills a GTFS feed into a renderable line map: one canonical path
//! per transit line, annotated with station coordinates and brand colors.

pub mod diagram;
pub mod gtfs;
pub mod network;
pub mod shared;
pub mod snapshot;

pub mod prelude {
    pub use crate::diagram::{Diagram, DiagramOptions, Position};
    pub use crate::gtfs::{GtfsDataset, GtfsReader};
    pub use crate::network::{Mode, Network};
    pub use crate::shared::{Color, Coordinate, Projection, Time};
    pub use crate::snapshot::Snapshot;
}
