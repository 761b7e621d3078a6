use nalgebra::Vector2;

use crate::Body;

/// One of the four sub-quadrants of a [`Quadrant`], with y pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    fn is_east(self) -> bool {
        matches!(self, Direction::NorthEast | Direction::SouthEast)
    }

    fn is_north(self) -> bool {
        matches!(self, Direction::NorthWest | Direction::NorthEast)
    }
}

/// An axis-aligned square region, given by its lower-left corner and side length.
///
/// Each axis is split half-open at the midpoint: a coordinate below the midpoint
/// belongs to the west/south half, everything else to the east/north half.
/// This makes [`Quadrant::choose_sub_quadrant`] total, so no position is ever dropped,
/// even on a boundary line or outside the region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrant {
    pub origin: Vector2<f64>,
    pub width: f64,
}

impl Quadrant {
    #[must_use]
    pub fn new(origin: Vector2<f64>, width: f64) -> Self {
        Self { origin, width }
    }

    #[must_use]
    pub fn center(&self) -> Vector2<f64> {
        self.origin + Vector2::repeat(self.width / 2.)
    }

    /// Whether `position` lies inside the closed square.
    #[must_use]
    pub fn contains(&self, position: &Vector2<f64>) -> bool {
        let upper = self.origin + Vector2::repeat(self.width);
        (0..2).all(|i| self.origin[i] <= position[i] && position[i] <= upper[i])
    }

    #[must_use]
    pub fn choose_sub_quadrant(&self, position: &Vector2<f64>) -> Direction {
        let center = self.center();
        match (position.x >= center.x, position.y >= center.y) {
            (false, true) => Direction::NorthWest,
            (true, true) => Direction::NorthEast,
            (false, false) => Direction::SouthWest,
            (true, false) => Direction::SouthEast,
        }
    }

    #[must_use]
    pub fn sub_quadrant(&self, direction: Direction) -> Quadrant {
        let half = self.width / 2.;
        let mut origin = self.origin;
        if direction.is_east() {
            origin.x += half;
        }
        if direction.is_north() {
            origin.y += half;
        }
        Quadrant::new(origin, half)
    }

    #[must_use]
    pub fn subdivide(&self) -> [Quadrant; 4] {
        Direction::ALL.map(|d| self.sub_quadrant(d))
    }

    /// Assign the bodies at `indices` to the four sub-quadrants.
    ///
    /// Sub-quadrants without any body are `None`.
    #[must_use]
    pub fn partition(&self, bodies: &[Body], indices: &[usize]) -> [Option<Vec<usize>>; 4] {
        let mut parts: [Option<Vec<usize>>; 4] = Default::default();
        for &i in indices {
            let direction = self.choose_sub_quadrant(&bodies[i].position);
            parts[direction.index()].get_or_insert_with(Vec::new).push(i);
        }
        parts
    }
}
