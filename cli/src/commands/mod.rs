pub mod compare;
pub mod shuffle;
