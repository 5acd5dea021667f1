// Portable expression string handling
//
// The portable form is literal text with `{{ id }}` placeholders for
// variable references. Function calls are plain literal text at this layer.

pub mod codec;
pub mod tokens;

pub(crate) mod scan;
