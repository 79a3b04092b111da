pub(crate) mod canvas;
pub(crate) mod frame;
pub(crate) mod resize;
