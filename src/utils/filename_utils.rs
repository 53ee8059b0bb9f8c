//! Tile coordinates encoded in file names

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::coordinate::Point;

lazy_static! {
    // ASCII digits only: no sign, decimal point or exponent
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").expect("digit run pattern is valid");
}

/// Parse tile coordinates from the first two digit runs of a file name
///
/// `tile_123_456.tif` yields X = 123, Y = 456. Returns `None` when the
/// name holds fewer than two digit runs.
pub fn parse_tile_coordinates(name: &str) -> Option<Point> {
    let mut runs = DIGIT_RUN.find_iter(name);
    let x = runs.next()?.as_str().parse::<f64>().ok()?;
    let y = runs.next()?.as_str().parse::<f64>().ok()?;
    Some(Point::new(x, y))
}

/// Same as [`parse_tile_coordinates`], applied to the file name of a path
pub fn tile_coordinates_of(path: &Path) -> Option<Point> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| parse_tile_coordinates(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_runs() {
        assert_eq!(parse_tile_coordinates("tile_123_456.tif"), Some(Point::new(123.0, 456.0)));
        assert_eq!(parse_tile_coordinates("7x8"), Some(Point::new(7.0, 8.0)));
    }

    #[test]
    fn test_extra_runs_are_ignored() {
        assert_eq!(parse_tile_coordinates("12_34_56.tif"), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_sign_and_decimal_point_are_separators() {
        assert_eq!(parse_tile_coordinates("-1.5_2.tif"), Some(Point::new(1.0, 5.0)));
    }

    #[test]
    fn test_fewer_than_two_runs() {
        assert_eq!(parse_tile_coordinates("tile_42.tif"), None);
        assert_eq!(parse_tile_coordinates("tile.tif"), None);
    }

    #[test]
    fn test_only_file_name_is_used() {
        let path = Path::new("/data/2024/tiles/tile_3_4.tif");
        assert_eq!(tile_coordinates_of(path), Some(Point::new(3.0, 4.0)));
    }
}
