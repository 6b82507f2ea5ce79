// crates/geocoder-core/src/query.rs
use crate::error::{GeocoderError, Result};
use crate::model::{Bounds, Coordinates};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A forward lookup: free-text address plus optional hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeocodeQuery {
    text: String,
    locale: Option<String>,
    bounds: Option<Bounds>,
    limit: Option<usize>,
    data: BTreeMap<String, String>,
}

impl GeocodeQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locale: None,
            bounds: None,
            limit: None,
            data: BTreeMap::new(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Hint for the backend; providers may ignore it.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Provider specific option, passed through untouched.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// A reverse lookup for a coordinate pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReverseQuery {
    coordinates: Coordinates,
    locale: Option<String>,
    limit: Option<usize>,
    data: BTreeMap<String, String>,
}

impl ReverseQuery {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            locale: None,
            limit: None,
            data: BTreeMap::new(),
        }
    }

    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::new(Coordinates::new(latitude, longitude))
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Either kind of lookup, as staged by a request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Geocode(GeocodeQuery),
    Reverse(ReverseQuery),
}

impl Query {
    /// The address text, or `"lat,lon"` for reverse queries.
    pub fn subject(&self) -> String {
        match self {
            Query::Geocode(q) => q.text.clone(),
            Query::Reverse(q) => q.coordinates.canonical(),
        }
    }

    /// Hints that are set, in a fixed order: locale, bounds, limit.
    pub fn hints(&self) -> Vec<(&'static str, String)> {
        let (locale, bounds, limit) = match self {
            Query::Geocode(q) => (q.locale(), q.bounds, q.limit),
            Query::Reverse(q) => (q.locale(), None, q.limit),
        };
        let mut hints = Vec::new();
        if let Some(locale) = locale {
            hints.push(("locale", locale.to_owned()));
        }
        if let Some(b) = bounds {
            hints.push(("bounds", format!("{},{},{},{}", b.south, b.west, b.north, b.east)));
        }
        if let Some(limit) = limit {
            hints.push(("limit", limit.to_string()));
        }
        hints
    }

    /// Human readable rendering: the subject followed by `|name=value` for
    /// every hint that is set.
    pub fn canonical(&self) -> String {
        let mut out = self.subject();
        for (name, value) in self.hints() {
            out.push_str(&format!("|{name}={value}"));
        }
        out
    }

    /// Rejects queries no backend could answer: blank text, coordinates out
    /// of range or not finite.
    pub fn validate(&self) -> Result<()> {
        match self {
            Query::Geocode(q) if q.text.trim().is_empty() => Err(GeocoderError::InvalidArgument(
                "geocode query cannot be empty".into(),
            )),
            Query::Geocode(_) => Ok(()),
            Query::Reverse(q) => {
                let Coordinates {
                    latitude,
                    longitude,
                } = q.coordinates;
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(GeocoderError::InvalidArgument(format!(
                        "coordinates out of range: {latitude},{longitude}"
                    )));
                }
                Ok(())
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Query::Geocode(_) => "geocode",
            Query::Reverse(_) => "reverse",
        }
    }
}

impl From<GeocodeQuery> for Query {
    fn from(q: GeocodeQuery) -> Self {
        Query::Geocode(q)
    }
}

impl From<ReverseQuery> for Query {
    fn from(q: ReverseQuery) -> Self {
        Query::Reverse(q)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.canonical())
    }
}
