//! Coordinate Reference System handling

use gdal::spatial_ref::SpatialRef;

use crate::raster::errors::{TileError, TileResult};

/// Identifier for the coordinate systems tiles are stamped with or warped into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 geographic (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM zone on the WGS 84 datum (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as u32
                } else {
                    32700 + *zone as u32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    format!("UTM Zone {}N (EPSG:{})", zone, self.epsg_code())
                } else {
                    format!("UTM Zone {}S (EPSG:{})", zone, self.epsg_code())
                }
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }

    /// Build the GDAL spatial reference for this coordinate system
    pub fn to_spatial_ref(&self) -> TileResult<SpatialRef> {
        Ok(SpatialRef::from_epsg(self.epsg_code())?)
    }

    /// Export this coordinate system as a canonical WKT projection descriptor
    pub fn to_wkt(&self) -> TileResult<String> {
        let wkt = self.to_spatial_ref()?.to_wkt()?;
        if wkt.is_empty() {
            return Err(TileError::GenericError(
                format!("Empty WKT exported for {}", self.description()),
            ));
        }
        Ok(wkt)
    }
}

/// Factory for creating coordinate systems
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> TileResult<CoordinateSystem> {
        match epsg {
            4326 => Ok(CoordinateSystem::WGS84),
            3857 => Ok(CoordinateSystem::WebMercator),
            32601..=32660 => Ok(CoordinateSystem::UTM((epsg - 32600) as u8, true)),
            32701..=32760 => Ok(CoordinateSystem::UTM((epsg - 32700) as u8, false)),
            0 => Err(TileError::ConfigError("EPSG code 0 is not a coordinate system".to_string())),
            _ => Ok(CoordinateSystem::Other(epsg)),
        }
    }

    /// Create a WGS 84 UTM coordinate system from a zone number and hemisphere
    pub fn utm(zone: u8, is_northern: bool) -> TileResult<CoordinateSystem> {
        if !(1..=60).contains(&zone) {
            return Err(TileError::ConfigError(
                format!("UTM zone must be within 1..=60, got {}", zone),
            ));
        }
        Ok(CoordinateSystem::UTM(zone, is_northern))
    }

    /// Parse a coordinate system from a string ("WGS84", "EPSG:4326" or "4326")
    pub fn from_string(crs_str: &str) -> TileResult<CoordinateSystem> {
        let crs_str = crs_str.trim().to_uppercase();

        if crs_str == "WGS84" || crs_str == "WGS 84" {
            return Ok(CoordinateSystem::WGS84);
        }

        if let Some(epsg_str) = crs_str.strip_prefix("EPSG:") {
            match epsg_str.parse::<u32>() {
                Ok(epsg) => Self::from_epsg(epsg),
                Err(_) => Err(TileError::ConfigError(format!("Invalid EPSG code: {}", epsg_str))),
            }
        } else if let Ok(epsg) = crs_str.parse::<u32>() {
            Self::from_epsg(epsg)
        } else {
            Err(TileError::ConfigError(format!("Unsupported CRS format: {}", crs_str)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_epsg_codes() {
        assert_eq!(CoordinateSystem::UTM(37, true).epsg_code(), 32637);
        assert_eq!(CoordinateSystem::UTM(37, false).epsg_code(), 32737);
        assert_eq!(CoordinateSystem::UTM(37, true).description(), "UTM Zone 37N (EPSG:32637)");
    }

    #[test]
    fn test_from_string() {
        assert_eq!(CoordinateSystemFactory::from_string("wgs84").unwrap(), CoordinateSystem::WGS84);
        assert_eq!(
            CoordinateSystemFactory::from_string("EPSG:32611").unwrap(),
            CoordinateSystem::UTM(11, true),
        );
        assert_eq!(
            CoordinateSystemFactory::from_string("32737").unwrap(),
            CoordinateSystem::UTM(37, false),
        );
        assert_eq!(
            CoordinateSystemFactory::from_string("2154").unwrap(),
            CoordinateSystem::Other(2154),
        );
        assert!(CoordinateSystemFactory::from_string("mercator").is_err());
        assert!(CoordinateSystemFactory::from_string("EPSG:abc").is_err());
    }

    #[test]
    fn test_utm_zone_bounds() {
        assert!(CoordinateSystemFactory::utm(0, true).is_err());
        assert!(CoordinateSystemFactory::utm(61, false).is_err());
        assert_eq!(
            CoordinateSystemFactory::utm(60, false).unwrap(),
            CoordinateSystem::UTM(60, false),
        );
    }

    #[test]
    fn test_utm_wkt_names_the_zone() {
        let wkt = CoordinateSystem::UTM(37, true).to_wkt().unwrap();
        assert!(wkt.contains("UTM zone 37N"));
        assert!(wkt.contains("WGS"));
    }
}
