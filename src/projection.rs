//! Placing maze cells on a screen. Nothing in the maze or the searches depends on this,
//! it is for whatever draws them.

use crate::cells::Cartesian2DCoordinate;
use crate::units::{GridLength, Height, Width};

/// Convert a pixel position (origin top left, y down) to normalised device coordinates
/// (origin at the centre, y up, both axes in -1..1).
///
/// The centre is at half the window size, rounded down.
pub fn to_normalised_device(pixel: (f32, f32), width: Width, height: Height) -> (f32, f32) {
    let centre_x = (width.0 / 2) as f32;
    let centre_y = (height.0 / 2) as f32;
    let (x, y) = pixel;
    ((x - centre_x) / centre_x, (centre_y - y) / centre_y)
}

/// Pixel size of one cell when the whole grid is stretched over the window.
pub fn cell_size(length: GridLength, width: Width, height: Height) -> (f32, f32) {
    let cells = length.0 as f32;
    (width.0 as f32 / cells, height.0 as f32 / cells)
}

/// Pixel position of the centre of a cell. `x` runs across the window and `y` down it.
pub fn cell_centre(coord: Cartesian2DCoordinate,
                   length: GridLength,
                   width: Width,
                   height: Height)
                   -> (f32, f32) {
    let (cell_width, cell_height) = cell_size(length, width, height);
    ((coord.x as f32 + 0.5) * cell_width, (coord.y as f32 + 0.5) * cell_height)
}
