pub mod markup;
mod source;

pub use markup::{Document, DocumentLine, LineKind};
pub use source::SiteSource;
