use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Fixed linear transform from geographic coordinates to display space.
/// The vertical axis is flipped since display y grows downward while
/// latitude grows northward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub origin: Coordinate,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Projection {
    pub const fn new(origin: Coordinate, scale_x: f64, scale_y: f64) -> Self {
        Self {
            origin,
            scale_x,
            scale_y,
        }
    }

    pub fn project(&self, coordinate: Coordinate) -> (f64, f64) {
        let x = self.scale_x * (coordinate.longitude - self.origin.longitude);
        let y = -self.scale_y * (coordinate.latitude - self.origin.latitude);
        (x, y)
    }
}

#[test]
fn project_test() {
    let projection = Projection::new(Coordinate::new(52.52, 13.5), 2000.0, 4000.0);
    let (x, y) = projection.project(Coordinate::new(52.0, 13.0));
    assert!((x - -1000.0).abs() < 1e-9);
    assert!((y - 2080.0).abs() < 1e-9);
}

#[test]
fn project_origin_test() {
    let origin = Coordinate::new(52.52, 13.5);
    let projection = Projection::new(origin, 2000.0, 4000.0);
    let (x, y) = projection.project(origin);
    assert_eq!((x, y), (0.0, 0.0));
}

#[test]
fn project_axis_direction_test() {
    let projection = Projection::new(Coordinate::new(0.0, 0.0), 1.0, 1.0);
    let (x, y) = projection.project(Coordinate::new(1.0, 1.0));
    assert!(x > 0.0);
    assert!(y < 0.0);
}
