//! Line output for reports such as `perft_divide`.
//!
//! Native builds write to stdout; in the browser the line goes to the
//! devtools console, since there is no stdout to read.

#[cfg(not(target_arch = "wasm32"))]
macro_rules! report_line {
    ($($arg:tt)*) => { println!($($arg)*) }
}

#[cfg(target_arch = "wasm32")]
macro_rules! report_line {
    ($($arg:tt)*) => {
        web_sys::console::log_1(&format!($($arg)*).into())
    }
}

pub(crate) use report_line;
