//! Error macros for notecluster

/// Macro for returning invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::ClusterError::invalid_value($context, $value))
    };
}

/// Macro for returning configuration errors
#[macro_export]
macro_rules! bail_config {
    ($($arg:tt)*) => {
        return Err($crate::error::ClusterError::invalid_config(format!($($arg)*)))
    };
}
