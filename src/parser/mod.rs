pub mod about;
pub mod company;
pub mod dom;
pub mod ld_json;
pub mod life;
pub mod profile;

pub use company::{compose_company, parse_company_page, CompanyRecord};
pub use life::{compose_company_life, CompanyLifeRecord};
pub use profile::{compose_profile, parse_profile_page, ProfileRecord};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no application/ld+json script on page")]
    MissingLdJson,
    #[error("malformed JSON-LD: {0}")]
    MalformedLdJson(#[from] serde_json::Error),
    #[error("unexpected JSON-LD shape: {0}")]
    UnexpectedShape(&'static str),
    #[error("no {0} node in JSON-LD")]
    MissingEntity(&'static str),
    #[error("invalid selector {selector}: {message}")]
    Selector { selector: String, message: String },
}
