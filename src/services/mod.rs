pub mod autocomplete;
pub mod import;
pub mod parser;
pub mod serializer;

pub use autocomplete::OptionAutoCompletion;
pub use import::rows_to_canvas_text;
pub use parser::QuestionParser;
pub use serializer::serialize_questions;
