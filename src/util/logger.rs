use std::fmt::{Display, Formatter};

use super::Log;

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl<T> Log<T> {
    /// Function which return order of the log.
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Log<T> {
    /// Print a pipeline level message when the assigned debug level is
    /// [Default](Log::Default) or above.
    pub fn log_default(&self, _message: std::fmt::Arguments) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Default(()).order() {
            println!("[{}]: {}", self, _message);
        }
    }

    /// Print a success or failure summary when the assigned debug level is
    /// [Result](Log::Result) or above.
    pub fn log_result(&self, _message: std::fmt::Arguments) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Result(()).order() {
            println!("[{}]: {}", self, _message);
        }
    }

    /// Print a per-cell message when the assigned debug level is
    /// [Verbose](Log::Verbose).
    pub fn log_verbose(&self, _message: std::fmt::Arguments) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Verbose(()).order() {
            println!("[{}]: {}", self, _message);
        }
    }
}
