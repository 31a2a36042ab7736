//! Response parser layer
//! - traits.rs: ResponseParser trait and ParseError
//! - types.rs: ExtractedVersion, FieldPath, MarkupKey
//! - structured.rs: JSON payload extraction
//! - markup.rs: XML/HTML payload extraction
//! - response.rs: content-sniffing dispatch between the two

pub mod markup;
pub mod response;
pub mod structured;
pub mod traits;
pub mod types;

pub use response::DualFormatParser;
pub use traits::{ParseError, ResponseParser};
pub use types::{ExtractedVersion, FieldPath, MarkupKey};
