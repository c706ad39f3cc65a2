pub mod fonts;
pub mod painter;
pub mod wrap;
