pub mod number;

pub use number::{leading_float, leading_int};
