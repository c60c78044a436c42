//! Dartboard hit-testing: turns a position on the board into points.
//!
//! Coordinates are in board radii with the origin at the bullseye, x to the
//! right and y pointing down, so the 20 sits straight up at angle -90°.

use std::fmt;

/// Sector numbers clockwise from the top.
pub const SECTORS: [u32; 20] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Angular width of one sector in degrees.
pub const SECTOR_WIDTH: f64 = 18.0;

/// Ring boundaries as fractions of the board radius.
mod rings {
    pub const INNER_BULL: f64 = 0.06;
    pub const OUTER_BULL: f64 = 0.12;
    pub const TRIPLE_INNER: f64 = 0.48;
    pub const TRIPLE_OUTER: f64 = 0.55;
    pub const DOUBLE_INNER: f64 = 0.88;
    pub const DOUBLE_OUTER: f64 = 0.99;
    pub const BOARD_EDGE: f64 = 1.0;
}

/// Which scoring band a dart landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    InnerBull,
    OuterBull,
    Single,
    Double,
    Triple,
    Miss,
}

/// A position on the board in radius units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardPoint {
    pub x: f64,
    pub y: f64,
}

impl BoardPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` radii from the centre along `angle_deg`.
    pub fn polar(distance: f64, angle_deg: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self {
            x: distance * angle.cos(),
            y: distance * angle.sin(),
        }
    }

    /// Middle of the given sector and ring. Bulls ignore the sector; a sector
    /// not on the board aims at the 20.
    pub fn aim_at(sector: u32, ring: Ring) -> Self {
        let slot = SECTORS.iter().position(|&s| s == sector).unwrap_or(0);
        let angle = -90.0 + slot as f64 * SECTOR_WIDTH;
        let distance = match ring {
            Ring::InnerBull => 0.0,
            Ring::OuterBull => (rings::INNER_BULL + rings::OUTER_BULL) / 2.0,
            Ring::Single => (rings::TRIPLE_OUTER + rings::DOUBLE_INNER) / 2.0,
            Ring::Triple => (rings::TRIPLE_INNER + rings::TRIPLE_OUTER) / 2.0,
            Ring::Double => (rings::DOUBLE_INNER + rings::DOUBLE_OUTER) / 2.0,
            Ring::Miss => 1.2,
        };
        Self::polar(distance, angle)
    }

    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle in degrees within `(-180, 180]`, 0 pointing right.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// The scored result of one dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub sector: u32,
    pub ring: Ring,
}

impl Hit {
    pub fn points(&self) -> u32 {
        match self.ring {
            Ring::InnerBull => 50,
            Ring::OuterBull => 25,
            Ring::Single => self.sector,
            Ring::Double => self.sector * 2,
            Ring::Triple => self.sector * 3,
            Ring::Miss => 0,
        }
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ring {
            Ring::InnerBull => write!(f, "Bull (50)"),
            Ring::OuterBull => write!(f, "Bull (25)"),
            Ring::Miss => write!(f, "Miss"),
            Ring::Triple => write!(f, "{} x3", self.sector),
            Ring::Double => write!(f, "{} x2", self.sector),
            Ring::Single => write!(f, "{}", self.sector),
        }
    }
}

/// Sector whose centre line is closest to the given angle.
pub fn sector_at(angle_deg: f64) -> u32 {
    let offset = (angle_deg + 90.0) / SECTOR_WIDTH;
    let slot = (offset.round() as i64).rem_euclid(SECTORS.len() as i64) as usize;
    SECTORS[slot]
}

/// Score a position on the board.
pub fn score(point: BoardPoint) -> Hit {
    let sector = sector_at(point.angle());
    let d = point.distance();
    let ring = if d <= rings::INNER_BULL {
        Ring::InnerBull
    } else if d <= rings::OUTER_BULL {
        Ring::OuterBull
    } else if (rings::TRIPLE_INNER..=rings::TRIPLE_OUTER).contains(&d) {
        Ring::Triple
    } else if (rings::DOUBLE_INNER..=rings::DOUBLE_OUTER).contains(&d) {
        Ring::Double
    } else if d <= rings::BOARD_EDGE {
        Ring::Single
    } else {
        Ring::Miss
    };
    Hit { sector, ring }
}
