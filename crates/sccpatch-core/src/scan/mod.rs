pub mod pattern;
pub mod scanner;

pub use pattern::{ByteTest, Operand, Pattern, PatternId};
pub use scanner::{scan, visit, IgnoreSet, Match};
