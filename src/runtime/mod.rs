pub(crate) mod controller;
pub(crate) mod layout;
pub(crate) mod store;
