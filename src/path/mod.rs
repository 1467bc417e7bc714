/// SVG path data: lexing, interpretation into points, and length measurement.
/// Only the commands KanjiVG strokes use are interpreted (M, L, H, V, Q, q, C, c).

pub mod interpreter;
pub mod length;
pub mod lexer;
pub mod policy;
