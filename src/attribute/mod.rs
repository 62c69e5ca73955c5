//! Typed scalar attribute values.
//!
//! Each type owns its parse-from-string and format-to-string logic; the
//! formatted form always re-emits the canonical attribute key, regardless of
//! how the source document spelled it.

mod bandwidth;
mod language;
mod resolution;
mod scalar;

pub use bandwidth::Bandwidth;
pub use language::Language;
pub use resolution::Resolution;
pub use scalar::{BoolAttr, CodecList, FrameRate, GroupId, MediaType, Name, ProgramId, Uri};
