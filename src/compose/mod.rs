pub(crate) mod cover;
pub(crate) mod frame;
pub(crate) mod text;
