// Logging abstraction for pentris-lib
// With `std-log` the `log` crate macros are re-exported, otherwise every
// macro expands to nothing and the crate stays dependency free.

#[cfg(feature = "std-log")]
pub use ::log::{debug, error, info, trace};

#[cfg(not(feature = "std-log"))]
mod noop {
    macro_rules! trace {
        ($($args:tt)*) => {};
    }

    macro_rules! debug {
        ($($args:tt)*) => {};
    }

    macro_rules! info {
        ($($args:tt)*) => {};
    }

    macro_rules! error {
        ($($args:tt)*) => {};
    }

    pub(crate) use {debug, error, info, trace};
}

#[cfg(not(feature = "std-log"))]
pub(crate) use noop::{debug, error, info, trace};

