//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod risk_band;
mod schedule;
mod timezone;
mod wind_direction;

pub use geo_location::GeoLocation;
pub use risk_band::{LIKELY_THRESHOLD, POSSIBLE_THRESHOLD, RiskBand};
pub use schedule::{Schedule, next_trigger};
pub use timezone::Timezone;
pub use wind_direction::{
    COMPASS_POINTS, DominantWind, WindDirection, compass_label, normalize_degrees,
};
