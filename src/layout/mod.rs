pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod strip;
