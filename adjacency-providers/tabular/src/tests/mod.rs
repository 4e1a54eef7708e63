pub(crate) use super::{TabularError, TabularFormat};

mod columnar;
mod convert;
mod errors;
mod support;
