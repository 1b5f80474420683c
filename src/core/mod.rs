pub mod dataset;
pub mod errors;
pub mod models;

pub use dataset::Dataset;
pub use errors::PracticeError;
pub use models::{ Chapter, Sentence };
