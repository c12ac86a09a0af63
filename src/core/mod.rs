pub mod etl;
pub mod export;
pub mod pipeline;
pub mod places;
pub mod search;

pub use crate::domain::model::{LeadBook, TransformResult};
pub use crate::domain::ports::{ConfigProvider, NearbyQuery, Pipeline, PlacesApi, Storage};
pub use crate::utils::error::Result;
