pub mod analyzers;
pub mod calendar;
pub mod config;
pub mod error;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;
pub mod time;
pub mod timetable;
