//! Asset validation tests

mod validation;
