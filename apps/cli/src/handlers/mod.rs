pub(crate) mod navigation;
pub(crate) mod period;
pub(crate) mod session;
pub(crate) mod slots;
