/// Member parsing inside type bodies.
///
/// Members are classified by their signature alone: constructors (identifier equal to the type name followed
/// by `(`), methods, properties, fields, nested types, and a catch-all for shapes that are only skipped.
impl<'a> Parser<'a> {
    /// Parse one member. Returns `Ok(None)` for stray `;` and dangling attributes.
    fn member(&mut self, type_name: &str) -> Result<Option<Spanned<Member>>, SyntaxError> {
        let start = self.current_span();
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(None);
        }
        self.skip_attributes()?;
        if self.check_punct(PunctuationId::RBrace) {
            return Ok(None);
        }

        let modifiers = self.modifiers();

        if self.at_type_declaration() {
            let decl = self.type_declaration(modifiers, start)?;
            return Ok(Some(Spanned::new(Member::Type(decl.node), decl.span)));
        }

        let node = if self.match_punct(PunctuationId::Tilde) {
            self.identifier()?;
            self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
            self.skip_member_body()?;
            other(OtherMemberKind::Destructor, modifiers)
        } else if self.match_keyword(KeywordId::Event) {
            self.skip_member_tail()?;
            other(OtherMemberKind::Event, modifiers)
        } else if self.match_keyword(KeywordId::Implicit) || self.match_keyword(KeywordId::Explicit) {
            self.skip_member_tail()?;
            other(OtherMemberKind::Conversion, modifiers)
        } else if self.at_constructor(type_name) {
            let name = self.identifier()?;
            let parameters = self.parameter_list()?;
            self.skip_constructor_initializer()?;
            self.skip_member_body()?;
            Member::Constructor(ConstructorDecl {
                modifiers,
                name,
                parameters,
            })
        } else {
            let ty = self.parse_return_type()?;
            self.member_after_type(modifiers, ty)?
        };

        Ok(Some(Spanned::new(node, start.merge(self.previous_span()))))
    }

    fn at_constructor(&self, type_name: &str) -> bool {
        self.peek().kind.ident() == Some(type_name) && self.peek_next().kind.is_punctuation(PunctuationId::LParen)
    }

    /// `: base(...)` / `: this(...)`
    fn skip_constructor_initializer(&mut self) -> Result<(), SyntaxError> {
        if self.match_punct(PunctuationId::Colon) {
            if !self.match_keyword(KeywordId::Base) {
                self.expect_keyword(KeywordId::This, "Expected 'base' or 'this' in constructor initializer")?;
            }
            self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
        }
        Ok(())
    }

    /// Everything after the leading type: methods, properties, fields, operators and indexers.
    fn member_after_type(&mut self, modifiers: Modifiers, ty: TypeRef) -> Result<Member, SyntaxError> {
        if self.match_keyword(KeywordId::Operator) {
            self.skip_member_tail()?;
            return Ok(other(OtherMemberKind::Operator, modifiers));
        }
        if self.check_keyword(KeywordId::This) {
            return self.indexer_tail(modifiers);
        }

        // `Name`, `Name<T>`, or an explicit interface implementation `IFoo<T>.Name`.
        let mut qualifier = Vec::new();
        let mut last = self.name_segment()?;
        while self.check_punct(PunctuationId::Dot) {
            self.advance();
            if self.check_keyword(KeywordId::This) {
                return self.indexer_tail(modifiers);
            }
            qualifier.push(last);
            last = self.name_segment()?;
        }
        let explicit_interface = if qualifier.is_empty() {
            None
        } else {
            Some(QualifiedName {
                alias: None,
                segments: qualifier,
            })
        };

        if self.check_punct(PunctuationId::LParen) {
            let parameters = self.parameter_list()?;
            self.skip_constraints()?;
            self.skip_member_body()?;
            return Ok(Member::Method(MethodDecl {
                modifiers,
                return_type: ty,
                explicit_interface,
                name: last.ident,
                type_parameters: last.type_args.iter().map(|t| t.to_string()).collect(),
                parameters,
            }));
        }

        if self.check_punct(PunctuationId::LBrace) {
            self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace)?;
            if self.match_punct(PunctuationId::Eq) {
                self.skip_to_semicolon()?;
            }
            return Ok(Member::Property(PropertyDecl {
                modifiers,
                ty,
                name: last.ident,
            }));
        }

        if self.match_punct(PunctuationId::FatArrow) {
            self.skip_to_semicolon()?;
            return Ok(Member::Property(PropertyDecl {
                modifiers,
                ty,
                name: last.ident,
            }));
        }

        self.field_tail(modifiers, ty, last.ident)
    }

    /// `int a = 1, b, c[4];`
    fn field_tail(&mut self, modifiers: Modifiers, ty: TypeRef, first: Ident) -> Result<Member, SyntaxError> {
        let mut names = vec![first];
        loop {
            if self.check_punct(PunctuationId::LBracket) {
                self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket)?;
            }
            if self.match_punct(PunctuationId::Eq) {
                self.skip_until_list_separator();
            }
            if self.match_punct(PunctuationId::Comma) {
                names.push(self.identifier()?);
                continue;
            }
            self.expect_punct(PunctuationId::Semicolon, "Expected ';' after field declaration")?;
            break;
        }
        Ok(Member::Field(FieldDecl { modifiers, ty, names }))
    }

    /// `this[int i] { get; }` with the cursor on `this`.
    fn indexer_tail(&mut self, modifiers: Modifiers) -> Result<Member, SyntaxError> {
        self.expect_keyword(KeywordId::This, "Expected 'this'")?;
        self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket)?;
        self.skip_member_tail()?;
        Ok(other(OtherMemberKind::Indexer, modifiers))
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// `(ref int a, params string[] rest, CancellationToken ct = default)`
    fn parameter_list(&mut self) -> Result<Vec<Spanned<Parameter>>, SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "Expected '('")?;
        let mut params = Vec::new();
        if self.match_punct(PunctuationId::RParen) {
            return Ok(params);
        }
        loop {
            params.push(self.parameter()?);
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::RParen, "Expected ',' or ')' in parameter list")?;
            break;
        }
        Ok(params)
    }

    fn parameter(&mut self) -> Result<Spanned<Parameter>, SyntaxError> {
        self.skip_attributes()?;
        let start = self.current_span();

        if self.check_contextual(ContextualKeywordId::Scoped) && self.peek_next().kind.is_word() {
            self.advance();
        }

        // `this ref`, `ref readonly`, ... keep the one that matters at the call site.
        let mut modifier: Option<ParameterModifier> = None;
        while let Some(m) = self.peek().keyword_id().and_then(ParameterModifier::from_keyword) {
            self.advance();
            modifier = match modifier {
                Some(existing) if existing.passes_by_reference() => Some(existing),
                _ => Some(m),
            };
        }
        self.match_keyword(KeywordId::Readonly);

        let ty = self.parse_type()?;
        let name = self.identifier()?;
        let has_default = self.match_punct(PunctuationId::Eq);
        if has_default {
            self.skip_until_list_separator();
        }

        Ok(Spanned::new(
            Parameter {
                modifier,
                ty,
                name,
                has_default,
            },
            start.merge(self.previous_span()),
        ))
    }
}

fn other(kind: OtherMemberKind, modifiers: Modifiers) -> Member {
    Member::Other(OtherMember { kind, modifiers })
}
