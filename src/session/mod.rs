pub(crate) mod manifest;
pub(crate) mod render_session;
