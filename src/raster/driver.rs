//! Output driver lookup and capability checks

use gdal::{Driver, DriverManager, Metadata};
use log::info;

use crate::raster::errors::{TileError, TileResult};

/// Driver metadata flag advertising `Create()` support
pub const CAN_CREATE: &str = "DCAP_CREATE";
/// Driver metadata flag advertising `CreateCopy()` support
pub const CAN_CREATE_COPY: &str = "DCAP_CREATECOPY";

/// Capabilities of an output driver relevant to tile writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCapabilities {
    /// Driver can create a dataset from scratch
    pub can_create: bool,
    /// Driver can create a dataset as a copy of another
    pub can_create_copy: bool,
}

/// Look up a registered driver by its short name (e.g. "GTiff")
pub fn lookup_driver(short_name: &str) -> TileResult<Driver> {
    DriverManager::get_driver_by_name(short_name)
        .map_err(|e| {
            TileError::GenericError(format!("Driver {} is not available: {}", short_name, e))
        })
}

/// Read the creation capabilities a driver advertises in its metadata
pub fn capabilities(driver: &Driver) -> DriverCapabilities {
    DriverCapabilities {
        can_create: has_capability(driver, CAN_CREATE),
        can_create_copy: has_capability(driver, CAN_CREATE_COPY),
    }
}

/// Fail unless `driver` advertises the given capability flag
pub fn require_capability(driver: &Driver, capability: &str) -> TileResult<()> {
    if has_capability(driver, capability) {
        info!("Driver {} supports {}", driver.short_name(), capability);
        Ok(())
    } else {
        Err(TileError::UnsupportedDriverCapability {
            driver: driver.short_name(),
            capability: capability.to_string(),
        })
    }
}

fn has_capability(driver: &Driver, capability: &str) -> bool {
    driver.metadata_item(capability, "")
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

/// Boolean parsing used by GDAL for metadata flags (YES/TRUE/ON/1)
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_uppercase().as_str(), "YES" | "TRUE" | "ON" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("YES"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("NO"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_gtiff_capabilities() {
        let driver = lookup_driver("GTiff").unwrap();
        let caps = capabilities(&driver);
        assert!(caps.can_create);
        assert!(caps.can_create_copy);
        assert!(require_capability(&driver, CAN_CREATE_COPY).is_ok());
    }

    #[test]
    fn test_missing_capability_is_reported() {
        // The PNG driver can only CreateCopy()
        let driver = lookup_driver("PNG").unwrap();
        match require_capability(&driver, CAN_CREATE) {
            Err(TileError::UnsupportedDriverCapability { driver, capability }) => {
                assert_eq!(driver, "PNG");
                assert_eq!(capability, CAN_CREATE);
            },
            other => panic!("expected UnsupportedDriverCapability, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_driver() {
        assert!(lookup_driver("NoSuchDriver").is_err());
    }
}
