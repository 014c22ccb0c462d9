pub(crate) mod decor;
pub(crate) mod frame;
pub(crate) mod label;
pub(crate) mod sprite;
