mod commands;
mod print;
mod quiz;
mod setup;

pub use commands::run;
