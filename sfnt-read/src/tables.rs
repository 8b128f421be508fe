//! The supported font tables

pub mod head;
pub mod hhea;
pub mod hvhea;
pub mod name;
pub mod vhea;

#[cfg(feature = "layout")]
pub mod gpos;
#[cfg(feature = "layout")]
pub mod gsub;
#[cfg(feature = "layout")]
pub mod layout;
