pub(crate) mod anchor;
pub(crate) mod balance;
pub(crate) mod consts;
pub(crate) mod fit;
pub(crate) mod metrics;
pub(crate) mod placeholder;
