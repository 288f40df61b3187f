pub mod stack_source;

pub use stack_source::StackSource;
