use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonError<E> {
    /// The edge interrupt controller refused the attach. Its error is passed through as is.
    #[error("edge interrupt attach failed: {0:?}")]
    Attach(E),
}
