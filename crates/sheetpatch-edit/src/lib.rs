//! Grid editing and the metadata-preserving merge.
//!
//! Editing happens on a [`Grid`]: a values-only projection of a sheet with
//! no formatting, merges, or sizing in it. The UI layer never needs to
//! understand document metadata, and [`merge`] is the single place
//! responsible for preservation: it reconciles the edited grid against the
//! original document's metadata into a new output document, copying
//! everything it does not explicitly override.
//!
//! [`EditSession`] strings the two together with the codec boundary into
//! the full load -> edit -> save pipeline.

mod grid;
mod merge;
mod session;

pub use grid::{Grid, InvalidAddressError};
pub use merge::{merge, MergeError};
pub use session::{EditSession, SaveError, SavedArtifact};
