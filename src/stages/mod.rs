//! The three planning stages. Each consumes the shared context and hands back
//! the context with its own entry appended.

pub mod date;
pub mod destination;
pub mod itinerary;

pub use date::{DateResolution, apply_date_response, resolve_date};
pub use destination::{attraction_query, describe_destination};
pub use itinerary::{ItinerarySettings, synthesize_itinerary};
