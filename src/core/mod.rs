pub mod cff_file;

pub use crate::domain::{Citant, Model};
pub use crate::utils::error::Result;
pub use cff_file::{CffFile, CFF_FILENAME};
