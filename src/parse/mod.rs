mod address;
mod error;
mod index_page;
mod inspection_page;
mod remove_excess_whitespace;
pub(crate) mod static_selector;
mod text_from_selection;

pub use address::Address;
pub use error::{Error, Result};
pub use index_page::InspectionLinks;
pub use inspection_page::{Inspection, TopSectionLayout};
pub use remove_excess_whitespace::remove_excess_whitespace;
