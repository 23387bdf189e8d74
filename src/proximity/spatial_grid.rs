use crate::orbit::GeodeticPosition;
use std::collections::HashMap;

/// Integer cell coordinates along the longitude, latitude and altitude axes.
pub type CellKey = (i64, i64, i64);

/// Uniform grid over raw (longitude°, latitude°, altitude km) coordinates.
///
/// The axes are bucketed independently with one edge length, so a cell is not a
/// geodesic volume and longitude does not wrap at ±180°. A neighborhood query
/// only inspects the 3×3×3 cells around a point; candidates within the search
/// radius but outside those cells are not returned.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    /// Buckets every `(item, position)` pair by its cell.
    pub fn build<I>(cell_size: f64, items: I) -> Self
    where I: IntoIterator<Item = (usize, GeodeticPosition)> {
        let mut grid = Self { cell_size, cells: HashMap::new() };
        for (item, pos) in items {
            let key = grid.cell_of(&pos);
            grid.cells.entry(key).or_default().push(item);
        }
        grid
    }

    pub fn cell_size(&self) -> f64 { self.cell_size }

    pub fn cell_count(&self) -> usize { self.cells.len() }

    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_of(&self, pos: &GeodeticPosition) -> CellKey {
        (
            (pos.longitude / self.cell_size).floor() as i64,
            (pos.latitude / self.cell_size).floor() as i64,
            (pos.altitude_km / self.cell_size).floor() as i64,
        )
    }

    /// Items bucketed in the 27 cells surrounding and including `center`.
    ///
    /// Neighbours beyond the `i64` range are skipped; `cell_of` saturates there,
    /// so no item can live in them.
    pub fn neighborhood(&self, center: CellKey) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy, cz) = center;
        (-1..=1)
            .flat_map(move |dx| (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| (dx, dy, dz))))
            .filter_map(move |(dx, dy, dz)| Some((cx.checked_add(dx)?, cy.checked_add(dy)?, cz.checked_add(dz)?)))
            .filter_map(|key| self.cells.get(&key))
            .flatten()
            .copied()
    }
}
