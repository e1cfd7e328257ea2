pub mod error;
pub mod stack;
pub mod grid;
pub mod pointer;
pub mod mode;
pub mod instruction;
pub mod io;
pub mod machine;
