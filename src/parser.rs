use crate::error::{ArithmeticError, CompilerError, NameError, SyntaxError};
use crate::interpreter::Variables;
use crate::lexer::Lexer;
use crate::token::{Kind, Token};

// Grammar rules evaluate their productions as they are recognized; the only
// state carried between rules is the single lookahead token.
pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, CompilerError> {
        let current = lexer.next_token().map_err(CompilerError::Lex)?;
        Ok(Self { lexer, current })
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn is_eof(&self) -> bool {
        self.current.kind == Kind::EOF
    }

    // Swaps the lookahead for the next token and hands back the consumed one.
    fn advance(&mut self) -> Result<Token, CompilerError> {
        let next = self.lexer.next_token().map_err(CompilerError::Lex)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn eat(&mut self, expecting: Kind) -> Result<Token, CompilerError> {
        if self.current.kind != expecting {
            return Err(CompilerError::Syntax(SyntaxError::from_token(
                &self.current,
                format!("expected {:?}, found {:?}", expecting, self.current.kind),
            )));
        }

        self.advance()
    }

    pub fn parse_expression(&mut self, variables: &Variables) -> Result<f64, CompilerError> {
        let first = self.parse_term(variables)?;
        self.continue_expression(first, variables)
    }

    // expr := term (('+' | '-') term)*, continued after an already-evaluated
    // first term; left-associative.
    pub fn continue_expression(
        &mut self,
        first: f64,
        variables: &Variables,
    ) -> Result<f64, CompilerError> {
        let mut result = first;

        while matches!(self.current.kind, Kind::Plus | Kind::Minus) {
            let operator = self.advance()?;
            let right = self.parse_term(variables)?;
            match operator.kind {
                Kind::Plus => result += right,
                _ => result -= right,
            }
        }

        Ok(result)
    }

    fn parse_term(&mut self, variables: &Variables) -> Result<f64, CompilerError> {
        let first = self.parse_factor(variables)?;
        self.continue_term(first, variables)
    }

    // term := factor (('*' | '/') factor)*, continued after an
    // already-evaluated first factor; left-associative.
    pub fn continue_term(
        &mut self,
        first: f64,
        variables: &Variables,
    ) -> Result<f64, CompilerError> {
        let mut result = first;

        while matches!(self.current.kind, Kind::Multiply | Kind::Divide) {
            let operator = self.advance()?;
            let right = self.parse_factor(variables)?;
            match operator.kind {
                Kind::Multiply => result *= right,
                _ => {
                    if right == 0.0 {
                        return Err(CompilerError::Arithmetic(ArithmeticError::from_token(
                            &operator,
                            "division by zero".to_string(),
                        )));
                    }
                    result /= right;
                }
            }
        }

        Ok(result)
    }

    // factor := NUMBER | IDENTIFIER | '(' expr ')'
    fn parse_factor(&mut self, variables: &Variables) -> Result<f64, CompilerError> {
        match self.current.kind {
            Kind::Number => {
                let token = self.eat(Kind::Number)?;
                token.text.parse::<f64>().map_err(|_| {
                    CompilerError::Syntax(SyntaxError::from_token(
                        &token,
                        format!("invalid number literal '{}'", token.text),
                    ))
                })
            }
            Kind::Identifier => {
                let token = self.eat(Kind::Identifier)?;
                self.read_variable(&token, variables)
            }
            Kind::LParen => {
                self.eat(Kind::LParen)?;
                let result = self.parse_expression(variables)?;
                self.eat(Kind::RParen)?;
                Ok(result)
            }
            _ => Err(CompilerError::Syntax(SyntaxError::from_token(
                &self.current,
                format!(
                    "expected a number, identifier or '(', found {:?}",
                    self.current.kind
                ),
            ))),
        }
    }

    pub fn read_variable(
        &self,
        token: &Token,
        variables: &Variables,
    ) -> Result<f64, CompilerError> {
        match variables.get(token.text.as_str()) {
            Some(value) => Ok(*value),
            None => Err(CompilerError::Name(NameError::from_token(token))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64, CompilerError> {
        eval_with(input, &Variables::new())
    }

    fn eval_with(input: &str, variables: &Variables) -> Result<f64, CompilerError> {
        let mut parser = Parser::new(Lexer::new(input))?;
        parser.parse_expression(variables)
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("2 * 3 + 4").unwrap(), 10.0);
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_eq!(eval("10 - 2 - 3").unwrap(), 5.0);
    }

    #[test]
    fn test_division_is_left_associative() {
        assert_eq!(eval("8 / 2 / 2").unwrap(), 2.0);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(eval("((1 + 2) * (3 + 4))").unwrap(), 21.0);
    }

    #[test]
    fn test_division_keeps_fractions() {
        assert_eq!(eval("7 / 2").unwrap(), 3.5);
    }

    #[test]
    fn test_division_by_zero_fails() {
        let err = eval("1 / 0").unwrap_err();
        assert!(matches!(err, CompilerError::Arithmetic(_)));
        assert!(err.to_string().starts_with("ArithmeticError:"));
    }

    #[test]
    fn test_division_by_zero_inside_expression() {
        let err = eval("2 + 6 / (3 - 3)").unwrap_err();
        assert!(matches!(err, CompilerError::Arithmetic(_)));
    }

    #[test]
    fn test_mismatched_parenthesis_is_syntax_error() {
        let err = eval("(2 + 3").unwrap_err();
        assert!(matches!(err, CompilerError::Syntax(_)));
    }

    #[test]
    fn test_dangling_operator_is_syntax_error() {
        let err = eval("2 +").unwrap_err();
        assert!(matches!(err, CompilerError::Syntax(_)));
    }

    #[test]
    fn test_identifier_factor_reads_variables() {
        let mut variables = Variables::new();
        variables.insert("x".to_string(), 5.0);
        assert_eq!(eval_with("x + 1", &variables).unwrap(), 6.0);
        assert_eq!(eval_with("x * x", &variables).unwrap(), 25.0);
    }

    #[test]
    fn test_undefined_variable_is_name_error() {
        let err = eval("y + 1").unwrap_err();
        assert!(matches!(err, CompilerError::Name(_)));
        assert!(err.to_string().contains("undefined variable 'y'"));
    }

    #[test]
    fn test_reserved_word_is_not_a_factor() {
        let err = eval("if + 1").unwrap_err();
        assert!(matches!(err, CompilerError::Syntax(_)));
    }

    #[test]
    fn test_eat_reports_expected_and_found_kinds() {
        let mut parser = Parser::new(Lexer::new("7")).unwrap();
        let err = parser.eat(Kind::Semicolon).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected Semicolon"));
        assert!(message.contains("found Number"));
    }
}
