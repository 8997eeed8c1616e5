//! Static postal-code directory.
//!
//! A small read-only reference table used to pre-fill city and state from a
//! PIN code and to offer city/state search. It is independent of field
//! validation.

use std::collections::BTreeSet;

use serde::Serialize;

/// Maximum results returned by [`LocationDirectory::search`] when the caller
/// does not choose a smaller limit.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Number of entries reported by [`LocationDirectory::popular`].
const POPULAR_COUNT: usize = 5;

/// One row of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub district: String,
}

/// A city within a state, as returned by [`LocationDirectory::cities_in_state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityEntry {
    pub city: String,
    pub district: String,
}

const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("110001", "New Delhi", "Delhi", "New Delhi"),
    ("400001", "Mumbai", "Maharashtra", "Mumbai City"),
    ("700001", "Kolkata", "West Bengal", "Kolkata"),
    ("600001", "Chennai", "Tamil Nadu", "Chennai"),
    ("500001", "Hyderabad", "Telangana", "Hyderabad"),
    ("560001", "Bangalore", "Karnataka", "Bangalore Urban"),
    ("380001", "Ahmedabad", "Gujarat", "Ahmedabad"),
    ("302001", "Jaipur", "Rajasthan", "Jaipur"),
    ("226001", "Lucknow", "Uttar Pradesh", "Lucknow"),
    ("800001", "Patna", "Bihar", "Patna"),
];

/// Read-only lookup table keyed by PIN code. Entry order is preserved.
#[derive(Debug, Clone)]
pub struct LocationDirectory {
    entries: Vec<Location>,
}

impl Default for LocationDirectory {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(pincode, city, state, district)| Location {
                pincode: pincode.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                district: district.to_string(),
            })
            .collect();
        Self { entries }
    }
}

impl LocationDirectory {
    pub fn new(entries: Vec<Location>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, pincode: &str) -> Option<&Location> {
        self.entries.iter().find(|l| l.pincode == pincode)
    }

    /// Case-insensitive substring search over city and state names.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Location> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|l| {
                l.city.to_lowercase().contains(&needle) || l.state.to_lowercase().contains(&needle)
            })
            .take(limit.min(MAX_SEARCH_RESULTS))
            .collect()
    }

    /// Sorted, de-duplicated state names.
    pub fn states(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|l| l.state.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn cities_in_state(&self, state: &str) -> Vec<CityEntry> {
        let wanted = state.to_lowercase();
        self.entries
            .iter()
            .filter(|l| l.state.to_lowercase() == wanted)
            .map(|l| CityEntry {
                city: l.city.clone(),
                district: l.district.clone(),
            })
            .collect()
    }

    pub fn popular(&self) -> &[Location] {
        &self.entries[..self.entries.len().min(POPULAR_COUNT)]
    }
}
