mod grade;
mod inspection;
mod top_section;
mod violations;

pub use inspection::Inspection;
pub use top_section::TopSectionLayout;

