//! Console and file output for scraped inspections.
mod console;
mod json;

pub use console::print_inspections;
pub use json::write_results;
#[cfg(test)]
pub use json::read_results;
