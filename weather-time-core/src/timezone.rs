use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt::{self, Debug};
use tzf_rs::DefaultFinder;

use crate::{error::LookupError, model::GeoPoint};

/// Maps coordinates to an IANA timezone identifier without network access.
pub trait TimezoneResolver: Send + Sync + Debug {
    fn timezone_at(&self, point: GeoPoint) -> Option<String>;
}

/// Point-in-polygon lookup over the bundled timezone boundary data.
///
/// Building the index is expensive; construct once and share.
pub struct TzfResolver {
    finder: DefaultFinder,
}

impl TzfResolver {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for TzfResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TzfResolver").finish_non_exhaustive()
    }
}

impl TimezoneResolver for TzfResolver {
    fn timezone_at(&self, point: GeoPoint) -> Option<String> {
        let name = self.finder.get_tz_name(point.longitude, point.latitude);
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Formats `now` in the named zone as `YYYY-MM-DD HH:MM:SS <abbrev><offset>`,
/// e.g. `2025-06-01 14:03:09 BST+0100`.
pub fn format_local_time(now: DateTime<Utc>, tz_name: &str) -> Result<String, LookupError> {
    let tz: Tz = tz_name
        .parse()
        .map_err(|_| LookupError::Malformed(format!("Unknown time zone '{tz_name}'")))?;

    Ok(now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z%z").to_string())
}
