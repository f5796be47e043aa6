/// Parse a token stream into a [`ParseOutput`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `stubgen_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<SyntaxError>)` only for unexpected end of input; see [`Parser::parse`].
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<ParseOutput, Vec<SyntaxError>> {
    let result = Parser::new(tokens).parse();
    if let Ok(output) = &result {
        if !output.diagnostics.is_empty() {
            tracing::debug!(recovered = output.diagnostics.len(), "parsed with recovered errors");
        }
    }
    result
}
