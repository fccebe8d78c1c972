pub mod extract;
pub mod gazetteer;
pub mod inference;
pub mod listing;
pub mod logic;
pub mod pipeline;

pub use listing::{ListingStatus, NormalizedListing, OfferType, PropertyType};
pub use pipeline::{Pipeline, RunStats};
