mod quote;
mod rate;

pub use quote::{Parcel, QuoteRequest};
pub use rate::QuotedRate;
