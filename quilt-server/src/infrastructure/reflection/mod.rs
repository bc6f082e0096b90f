mod cohere;
mod disabled;

pub use cohere::CohereTextGenerator;
pub use disabled::DisabledTextGenerator;
