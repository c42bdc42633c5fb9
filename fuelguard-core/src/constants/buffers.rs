//! Buffer Size Constants
//!
//! Positions keep their attributes inline so enrichment never allocates.

/// Maximum number of attributes carried by a position.
///
/// Must be a power of two (heapless `FnvIndexMap` requirement). IO-heavy
/// decoders emit several dozen raw ports, and enrichment adds up to four keys.
pub const MAX_ATTRIBUTES: usize = 64;

/// Maximum length of a raw port identifier such as `adc1` or `io327`.
pub const MAX_PORT_ID_LEN: usize = 16;
