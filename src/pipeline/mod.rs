pub(crate) mod compose;
pub(crate) mod opts;
pub(crate) mod sink;
pub(crate) mod source;
