use thiserror::Error;

/// Everything that can go wrong while generating, writing or reading a system.
#[derive(Error, Debug)]
pub enum AutogenError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid normal distribution: {0}")]
    Normal(#[from] rand_distr::NormalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("malformed value for `{key}`: {value:?}")]
    Properties { key: String, value: String },
}

pub type Result<T, E = AutogenError> = std::result::Result<T, E>;

/// Reject values that are not strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(AutogenError::InvalidParameter {
            name,
            reason: format!("expected a positive finite number, got {value}"),
        })
    }
}
