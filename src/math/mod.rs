//! Mathematical utilities: the decoherence kernel, log-log slopes, and the
//! probabilistic stress-energy tensor.

pub mod kernel;
pub mod slope;
pub mod tensor;

pub use kernel::*;
pub use slope::*;
pub use tensor::*;
