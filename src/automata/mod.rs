pub mod closure;
pub mod program;
pub mod sparse;
