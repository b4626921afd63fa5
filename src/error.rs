use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::value::EvalError;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub Error

    Lex{source: LexError} = "{source}",
    Parse{source: ParseError} = "{source}",
    Eval{source: EvalError} = "{source}",
}
