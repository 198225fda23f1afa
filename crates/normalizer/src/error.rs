use thiserror::Error;

pub type Result<T> = std::result::Result<T, NormalizerError>;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Synonym abbreviation must not be empty (expansion '{expansion}')")]
    EmptyAbbreviation { expansion: String },

    #[error("Invalid synonym pattern for '{abbreviation}': {source}")]
    Pattern {
        abbreviation: String,
        #[source]
        source: regex::Error,
    },
}
