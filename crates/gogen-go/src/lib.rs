pub mod emitters;
mod generator;

pub use generator::GoModelGenerator;
