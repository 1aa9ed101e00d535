//! # 错误处理宏

/// 快速创建参数错误的宏
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::ChirpyError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ChirpyError::validation(format!($fmt, $($arg)*))
    };
}

/// 快速创建配置错误的宏
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::ChirpyError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ChirpyError::config(format!($fmt, $($arg)*))
    };
}

/// 确保条件成立，否则返回参数错误
#[macro_export]
macro_rules! ensure_valid {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::validation_error!($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::validation_error!($fmt, $($arg)*));
        }
    };
}

/// 确保条件成立，否则返回配置错误
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::config_error!($msg));
        }
    };
}
