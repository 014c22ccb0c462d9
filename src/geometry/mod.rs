pub(crate) mod mask;
pub(crate) mod outline;
