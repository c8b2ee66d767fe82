//! Key layouts as permutations of a fixed alphabet.

mod render;
mod types;

pub use render::{render_qwerty, render_rows, QWERTY_ROWS, UNASSIGNED};
pub use types::{Alphabet, Layout, LATIN_LETTERS};
