pub mod measurement;
pub mod status;
