pub mod capability;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
