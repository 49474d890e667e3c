//! Display implementations rendering both tree shapes back into
//! source-shaped text. Used by the CLI to echo lowered forms and by error
//! construction to quote offending sub-trees.

pub mod core;
pub mod surface;
