use std::fmt::Display;

pub const RED: &str = "\x1B[1;31m";
pub const GRN: &str = "\x1B[1;32m";
pub const YEL: &str = "\x1B[1;33m";
pub const GRY: &str = "\x1B[1;30m";
pub const RESET: &str = "\x1B[0m";

pub fn error<S: Display>(msg: S) {
    eprintln!("[fec] {}error:{} {}", RED, RESET, msg);
}

pub fn warn<S: Display>(msg: S) {
    eprintln!("[fec] {}warning:{} {}", YEL, RESET, msg);
}

pub fn info<S: Display>(msg: S) {
    eprintln!("[fec] {}info:{} {}", GRN, RESET, msg);
}

pub fn debug<S: Display>(msg: S) {
    eprintln!("[fec] {}DEBUG:{} {}", GRY, RESET, msg);
}
