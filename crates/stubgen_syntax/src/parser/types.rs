/// Type parsing.
///
/// Handles predefined keyword types, (alias-)qualified generic names, tuples, and the `?`, `[]`/`[,]` and `*`
/// suffixes. `>` is always a single token, so nested generic argument lists need no splitting.
impl<'a> Parser<'a> {
    /// A member's leading type, allowing `ref` / `ref readonly` returns.
    fn parse_return_type(&mut self) -> Result<TypeRef, SyntaxError> {
        if self.match_keyword(KeywordId::Ref) {
            self.match_keyword(KeywordId::Readonly);
        }
        self.parse_type()
    }

    fn parse_type(&mut self) -> Result<TypeRef, SyntaxError> {
        let mut ty = self.parse_non_array_type()?;
        loop {
            if self.match_punct(PunctuationId::Question) {
                ty = TypeRef::Nullable(Box::new(ty));
            } else if self.check_punct(PunctuationId::LBracket)
                && (self.peek_next().kind.is_punctuation(PunctuationId::RBracket)
                    || self.peek_next().kind.is_punctuation(PunctuationId::Comma))
            {
                self.advance();
                let mut rank = 1;
                while self.match_punct(PunctuationId::Comma) {
                    rank += 1;
                }
                self.expect_punct(PunctuationId::RBracket, "Expected ']' in array type")?;
                ty = TypeRef::Array {
                    element: Box::new(ty),
                    rank,
                };
            } else if self.match_punct(PunctuationId::Star) {
                ty = TypeRef::Pointer(Box::new(ty));
            } else {
                break;
            }
        }
        Ok(ty)
    }

    fn parse_non_array_type(&mut self) -> Result<TypeRef, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::LParen) => self.tuple_type(),
            TokenKind::Keyword(id) => match types::from_keyword(*id) {
                Some(predefined) => {
                    self.advance();
                    Ok(TypeRef::Predefined(predefined))
                }
                None => Err(self.error_here("Expected type")),
            },
            TokenKind::Ident(_) => Ok(TypeRef::Named(self.qualified_name()?)),
            _ => Err(self.error_here("Expected type")),
        }
    }

    /// `(int count, string)`
    fn tuple_type(&mut self) -> Result<TypeRef, SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "Expected '('")?;
        let mut elements = Vec::new();
        loop {
            let ty = self.parse_type()?;
            let name = if self.peek().kind.ident().is_some() {
                Some(self.identifier()?)
            } else {
                None
            };
            elements.push(TupleElement { ty, name });
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::RParen, "Expected ',' or ')' in tuple type")?;
            break;
        }
        Ok(TypeRef::Tuple(elements))
    }

    /// `global::System.Collections.Generic.List<int>`
    fn qualified_name(&mut self) -> Result<QualifiedName, SyntaxError> {
        let alias = if self.peek().kind.ident().is_some()
            && self.peek_next().kind.is_punctuation(PunctuationId::ColonColon)
        {
            let alias = self.identifier()?;
            self.advance();
            Some(alias)
        } else {
            None
        };

        let mut segments = vec![self.name_segment()?];
        while self.check_punct(PunctuationId::Dot) && self.peek_next().kind.ident().is_some() {
            self.advance();
            segments.push(self.name_segment()?);
        }
        Ok(QualifiedName { alias, segments })
    }

    fn name_segment(&mut self) -> Result<NameSegment, SyntaxError> {
        let ident = self.identifier()?;
        let type_args = if self.check_punct(PunctuationId::Lt) {
            self.type_argument_list()?
        } else {
            Vec::new()
        };
        Ok(NameSegment { ident, type_args })
    }

    /// `<int, List<string>>`
    fn type_argument_list(&mut self) -> Result<Vec<TypeRef>, SyntaxError> {
        self.expect_punct(PunctuationId::Lt, "Expected '<'")?;
        let mut args = Vec::new();
        loop {
            self.skip_attributes()?;
            args.push(self.parse_type()?);
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::Gt, "Expected ',' or '>' in type argument list")?;
            break;
        }
        Ok(args)
    }
}
