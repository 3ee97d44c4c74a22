pub mod data;
pub mod settings;
pub mod shared;
pub mod shifts;
pub mod summary;
pub mod tip_out;
