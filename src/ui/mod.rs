pub(crate) mod render;
pub(crate) mod theme;
pub(crate) mod util;
