pub mod evaluator;

pub mod lexer;

pub mod operators;

pub mod parser;

pub mod precedence_climbing;

pub mod shunting_yard;

pub mod tokens;


pub use evaluator::*;
pub use lexer::*;
pub use operators::*;
pub use parser::*;
pub use precedence_climbing::*;
pub use shunting_yard::*;
pub use tokens::*;
