/// Declaration parsing: `using` directives, namespaces and type declarations.
///
/// ## Notes
/// - A file-scoped `namespace X;` swallows every following declaration up to end of input.
/// - Records with a parameter list and C# 12 classes with a primary constructor keep that list in
///   [`TypeDecl::primary_parameters`].
impl<'a> Parser<'a> {
    // ========================================================================
    // Namespace level
    // ========================================================================

    /// Parse namespace-level items until the closing `}` (when `closing` names the namespace) or end of input.
    fn namespace_members(
        &mut self,
        usings: &mut Vec<Spanned<UsingDirective>>,
        closing: Option<&str>,
    ) -> Vec<Spanned<NamespaceMember>> {
        let mut members = Vec::new();
        loop {
            match closing {
                Some(name) => {
                    if self.match_punct(PunctuationId::RBrace) {
                        break;
                    }
                    if self.is_at_end() {
                        self.unterminated(&format!("namespace `{name}`"));
                        break;
                    }
                }
                None => {
                    if self.is_at_end() {
                        break;
                    }
                }
            }

            let start = self.pos;
            match self.namespace_item() {
                Ok(NamespaceItem::Using(using)) => usings.push(using),
                Ok(NamespaceItem::Member(member)) => members.push(member),
                Ok(NamespaceItem::Skipped) => {}
                Err(e) => {
                    self.record(e);
                    self.synchronize_member();
                    if self.pos == start {
                        self.advance();
                    }
                }
            }
        }
        members
    }

    fn namespace_item(&mut self) -> Result<NamespaceItem, SyntaxError> {
        if self.check_keyword(KeywordId::Using)
            || (self.check_contextual(ContextualKeywordId::Global) && self.peek_next().kind.is_keyword(KeywordId::Using))
        {
            return Ok(NamespaceItem::Using(self.using_directive()?));
        }
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(NamespaceItem::Skipped);
        }
        if self.check_keyword(KeywordId::Extern) && self.peek_next().kind.ident() == Some("alias") {
            self.skip_to_semicolon()?;
            return Ok(NamespaceItem::Skipped);
        }
        if self.check_keyword(KeywordId::Namespace) {
            let ns = self.namespace_declaration()?;
            return Ok(NamespaceItem::Member(Spanned::new(NamespaceMember::Namespace(ns.node), ns.span)));
        }

        let start = self.current_span();
        let had_attributes = self.check_punct(PunctuationId::LBracket);
        self.skip_attributes()?;
        let modifiers = self.modifiers();
        // Assembly/module attributes stand alone; whatever follows (a namespace, a using, `}`) is the next item.
        if had_attributes && modifiers.0.is_empty() && !self.at_type_declaration() {
            return Ok(NamespaceItem::Skipped);
        }
        let decl = self.type_declaration(modifiers, start)?;
        Ok(NamespaceItem::Member(Spanned::new(NamespaceMember::Type(decl.node), decl.span)))
    }

    fn using_directive(&mut self) -> Result<Spanned<UsingDirective>, SyntaxError> {
        let start = self.current_span();
        let is_global = self.check_contextual(ContextualKeywordId::Global);
        if is_global {
            self.advance();
        }
        self.expect_keyword(KeywordId::Using, "Expected 'using'")?;

        let kind = if self.match_keyword(KeywordId::Static) {
            UsingKind::Static(self.parse_type()?)
        } else if self.peek().kind.ident().is_some() && self.peek_next().kind.is_punctuation(PunctuationId::Eq) {
            let alias = self.identifier()?;
            self.advance();
            UsingKind::Alias {
                alias,
                target: self.parse_type()?,
            }
        } else {
            UsingKind::Namespace(self.qualified_name()?)
        };

        let end = self
            .expect_punct(PunctuationId::Semicolon, "Expected ';' after using directive")?
            .span;
        Ok(Spanned::new(UsingDirective { is_global, kind }, start.merge(end)))
    }

    fn namespace_declaration(&mut self) -> Result<Spanned<NamespaceDecl>, SyntaxError> {
        let start = self.current_span();
        self.expect_keyword(KeywordId::Namespace, "Expected 'namespace'")?;
        let name = self.dotted_name()?;

        let mut usings = Vec::new();
        let (file_scoped, members) = if self.match_punct(PunctuationId::Semicolon) {
            (true, self.namespace_members(&mut usings, None))
        } else {
            self.expect_punct(PunctuationId::LBrace, "Expected '{' or ';' after namespace name")?;
            (false, self.namespace_members(&mut usings, Some(&name)))
        };

        Ok(Spanned::new(
            NamespaceDecl {
                name,
                file_scoped,
                usings,
                members,
            },
            start.merge(self.previous_span()),
        ))
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// Return `true` if the current token starts a type declaration (after modifiers).
    fn at_type_declaration(&self) -> bool {
        let kind = &self.peek().kind;
        kind.is_keyword(KeywordId::Class)
            || kind.is_keyword(KeywordId::Struct)
            || kind.is_keyword(KeywordId::Interface)
            || kind.is_keyword(KeywordId::Enum)
            || kind.is_keyword(KeywordId::Delegate)
            || (kind.is_contextual(ContextualKeywordId::Record) && {
                let next = &self.peek_next().kind;
                next.is_keyword(KeywordId::Class) || next.is_keyword(KeywordId::Struct) || next.ident().is_some()
            })
    }

    /// Parse a type declaration whose attributes and modifiers have already been consumed.
    fn type_declaration(&mut self, modifiers: Modifiers, start: Span) -> Result<Spanned<TypeDecl>, SyntaxError> {
        let kind = if self.match_keyword(KeywordId::Class) {
            TypeKind::Class
        } else if self.match_keyword(KeywordId::Struct) {
            TypeKind::Struct
        } else if self.match_keyword(KeywordId::Interface) {
            TypeKind::Interface
        } else if self.match_keyword(KeywordId::Enum) {
            return self.enum_declaration(modifiers, start);
        } else if self.match_keyword(KeywordId::Delegate) {
            return self.delegate_declaration(modifiers, start);
        } else if self.at_type_declaration() {
            // `record`, `record class`, `record struct`
            self.advance();
            if self.match_keyword(KeywordId::Struct) {
                TypeKind::RecordStruct
            } else {
                self.match_keyword(KeywordId::Class);
                TypeKind::Record
            }
        } else {
            return Err(self.error_here("Expected type declaration"));
        };

        let name = self.identifier()?;
        let type_parameters = self.type_parameter_list()?;
        let primary_parameters = if self.check_punct(PunctuationId::LParen) {
            Some(self.parameter_list()?)
        } else {
            None
        };
        let base_types = if self.match_punct(PunctuationId::Colon) {
            self.base_list()?
        } else {
            Vec::new()
        };
        self.skip_constraints()?;

        let members = if self.match_punct(PunctuationId::Semicolon) {
            Vec::new()
        } else {
            self.expect_punct(PunctuationId::LBrace, &format!("Expected '{{' to open {kind} `{name}`"))?;
            let members = self.type_body(kind, &name);
            self.match_punct(PunctuationId::Semicolon);
            members
        };

        Ok(Spanned::new(
            TypeDecl {
                kind,
                name,
                modifiers,
                type_parameters,
                primary_parameters,
                base_types,
                members,
            },
            start.merge(self.previous_span()),
        ))
    }

    /// Parse members until the closing `}` of a type body.
    fn type_body(&mut self, kind: TypeKind, type_name: &str) -> Vec<Spanned<Member>> {
        let mut members = Vec::new();
        loop {
            if self.match_punct(PunctuationId::RBrace) {
                break;
            }
            if self.is_at_end() {
                self.unterminated(&format!("{kind} `{type_name}`"));
                break;
            }

            let start = self.pos;
            match self.member(type_name) {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(e) => {
                    tracing::trace!(error = %e, "recovering inside {kind} `{type_name}`");
                    self.record(e);
                    self.synchronize_member();
                    if self.pos == start {
                        self.advance();
                    }
                }
            }
        }
        members
    }

    fn enum_declaration(&mut self, modifiers: Modifiers, start: Span) -> Result<Spanned<TypeDecl>, SyntaxError> {
        let name = self.identifier()?;
        let base_types = if self.match_punct(PunctuationId::Colon) {
            vec![self.parse_type()?]
        } else {
            Vec::new()
        };
        self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace)?;
        self.match_punct(PunctuationId::Semicolon);
        Ok(Spanned::new(
            TypeDecl {
                kind: TypeKind::Enum,
                name,
                modifiers,
                type_parameters: Vec::new(),
                primary_parameters: None,
                base_types,
                members: Vec::new(),
            },
            start.merge(self.previous_span()),
        ))
    }

    fn delegate_declaration(&mut self, modifiers: Modifiers, start: Span) -> Result<Spanned<TypeDecl>, SyntaxError> {
        self.parse_return_type()?;
        let name = self.identifier()?;
        let type_parameters = self.type_parameter_list()?;
        let parameters = self.parameter_list()?;
        self.skip_constraints()?;
        self.expect_punct(PunctuationId::Semicolon, "Expected ';' after delegate declaration")?;
        Ok(Spanned::new(
            TypeDecl {
                kind: TypeKind::Delegate,
                name,
                modifiers,
                type_parameters,
                primary_parameters: Some(parameters),
                base_types: Vec::new(),
                members: Vec::new(),
            },
            start.merge(self.previous_span()),
        ))
    }

    /// `<T, in U, [Attr] out V>`
    fn type_parameter_list(&mut self) -> Result<Vec<Ident>, SyntaxError> {
        let mut params = Vec::new();
        if !self.match_punct(PunctuationId::Lt) {
            return Ok(params);
        }
        loop {
            self.skip_attributes()?;
            if !self.match_keyword(KeywordId::In) {
                self.match_keyword(KeywordId::Out);
            }
            params.push(self.identifier()?);
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::Gt, "Expected ',' or '>' in type parameter list")?;
            break;
        }
        Ok(params)
    }

    /// `: Base(args), IFoo, IBar<T>`
    fn base_list(&mut self) -> Result<Vec<TypeRef>, SyntaxError> {
        let mut bases = Vec::new();
        loop {
            bases.push(self.parse_type()?);
            if self.check_punct(PunctuationId::LParen) {
                self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(bases)
    }

    /// Declaration modifiers: reserved modifier keywords plus contextual ones (`partial`, `async`, ...) when
    /// another word follows them.
    fn modifiers(&mut self) -> Modifiers {
        let mut mods = Vec::new();
        loop {
            let token = &self.peek().kind;
            let next = &self.peek_next().kind;
            let modifier = match token {
                TokenKind::Keyword(id) if keywords::is_modifier(*id) => Some(Modifier::Keyword(*id)),
                TokenKind::Keyword(KeywordId::Fixed) => Some(Modifier::Keyword(KeywordId::Fixed)),
                // `ref struct`, `ref partial struct`
                TokenKind::Keyword(KeywordId::Ref)
                    if next.is_keyword(KeywordId::Struct) || next.is_contextual(ContextualKeywordId::Partial) =>
                {
                    Some(Modifier::Keyword(KeywordId::Ref))
                }
                TokenKind::Ident(_) => match token.contextual_id() {
                    Some(id) if keywords::is_contextual_modifier(id) && next.is_word() => Some(Modifier::Contextual(id)),
                    _ => None,
                },
                _ => None,
            };
            match modifier {
                Some(m) => {
                    mods.push(m);
                    self.advance();
                }
                None => break,
            }
        }
        Modifiers(mods)
    }
}
