/// Option and argument binding against the leaf command.
pub mod extract;
/// Command path resolution.
pub mod hierarchy;
/// Route tokenizer: borrowed tokens with byte spans.
pub mod lexer;
/// The tokenize, resolve, extract pipeline.
pub mod parser;
