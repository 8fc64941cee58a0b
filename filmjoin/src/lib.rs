pub mod model;
pub mod dataset;
pub mod validation;
pub mod join;
pub mod summary;
pub mod output;
pub mod error;

pub use error::{FilmJoinError, Result};
pub use model::{CastMember, CastView, Film, FilmView, Genre, GenreGroup};
pub use dataset::{load_dataset, parse_dataset_str, Dataset, LoadedDataset, ParseOptions};
pub use join::transform;
pub use output::OutputFormat;
