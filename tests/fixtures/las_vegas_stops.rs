//! Real Las Vegas / Henderson places for route fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

#![allow(dead_code)]

/// A named place with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    /// The place typed as a literal `lat, lng` pair.
    pub fn typed(&self) -> String {
        format!("{:.7}, {:.7}", self.lat, self.lng)
    }
}

pub const DEPOT: Place = Place::new("Wynn Las Vegas", 36.1263781, -115.1658180);

/// Spread across the metro area.
pub const METRO_STOPS: &[Place] = &[
    Place::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Place::new("Beers and Bets", 36.1428945, -115.1573836),
    Place::new("Bellagio", 36.1126000, -115.1767000),
    Place::new("MGM Grand", 36.1023654, -115.1688720),
    Place::new("Bootlegger Bistro", 36.0492047, -115.1715744),
    Place::new("Budget Suites South", 36.0366259, -115.1713361),
    Place::new("Green Valley Ranch Area", 36.0308000, -115.0825000),
    Place::new("Sunset Station Area", 36.0614000, -115.0631000),
    Place::new("Longhorn Casino", 36.1070664, -115.0591256),
    Place::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Place::new("Islander's Grill", 36.0335058, -114.9856162),
    Place::new("Hard Rock Cafe", 36.1041592, -115.1722166),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_are_in_the_vegas_area() {
        for place in METRO_STOPS.iter().chain(std::iter::once(&DEPOT)) {
            assert!(place.lat > 35.9 && place.lat < 36.3, "{} lat out of range", place.name);
            assert!(place.lng > -115.4 && place.lng < -114.8, "{} lng out of range", place.name);
        }
    }
}
