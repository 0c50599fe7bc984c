mod pdf;
pub use pdf::*;
