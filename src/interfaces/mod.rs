pub mod subconverter;

pub use subconverter::{convert, subconverter, write_outputs, Conversion, OutputReport};
