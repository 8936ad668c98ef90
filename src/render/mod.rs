pub(crate) mod buffer;
pub(crate) mod queue;
pub(crate) mod scheduler;
pub(crate) mod session;
