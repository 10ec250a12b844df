use crate::error::Result;

/// Validate structural integrity of a configuration or input entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
