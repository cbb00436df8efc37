//! # Argument Macros
//!
//! Shorthand for building `Args` values.
//!
//! ## kwargs!
//!
//! ```ignore
//! let p = point.call(kwargs!(x = 1, y = 2))?;
//! let q = p.replace(kwargs!(y = Value::from("moved")))?;
//!
//! // Expands to:
//! // Args::new().kw("x", 1).kw("y", 2)
//! ```
//!
//! Each value goes through `Into<V>` separately, so a single call may mix
//! value types that all convert into the record's payload.
//!
//! ## args!
//!
//! ```ignore
//! let p = point.call(args!(1, 2))?;
//! let p = point.call(args!(1).kw("y", 2))?;
//! ```

/// Builds keyword-only `Args`.
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::records::Args::new()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {
        $crate::records::Args::new()
            $(.kw(::core::stringify!($name), $value))+
    };
}

/// Builds positional-only `Args`.
#[macro_export]
macro_rules! args {
    () => {
        $crate::records::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::records::Args::new()
            $(.pos($value))+
    };
}
