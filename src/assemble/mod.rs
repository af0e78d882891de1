//! Reference assembly: gap backfill and the typed assembly buffer

pub mod assembler;
pub mod buffer;

pub use assembler::ReferenceAssembler;
pub use buffer::{AssemblyBuffer, Edit, EditKind, RectifiedBases};
