//! Macros for constructing root faults

/// Create a root [`Fault`](crate::Fault) from a format string.
#[macro_export]
macro_rules! fault {
    ($($arg:tt)*) => {
        $crate::Fault::msg(format!($($arg)*))
    };
}

/// Return early with a root fault.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::fault!($($arg)*))
    };
}

/// Return early with a root fault unless a condition holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
