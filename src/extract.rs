//! Model extraction: C# source text → [`ExtractedUnit`].
//!
//! Extraction walks the syntax tree in pre-order so classes come out in source order, nested classes right
//! after their parent. Only declarations are looked at; method and constructor bodies were already skipped by
//! the parser.
//!
//! ## Notes
//! - Recoverable syntax errors (one malformed member or statement) are logged and extraction continues on the
//!   recovered tree. Lexical errors and unterminated bodies fail the whole unit.
//! - A class's namespace is the name of its innermost enclosing namespace declaration, as written.

use miette::Diagnostic;
use thiserror::Error;

use stubgen_core::lang::keywords::KeywordId;
use stubgen_syntax::ast::{
    CompilationUnit, ConstructorDecl, Member, MethodDecl, NamespaceMember, Parameter, Spanned, TypeDecl, TypeKind,
};
use stubgen_syntax::diagnostics::{self, SyntaxError};
use stubgen_syntax::{lexer, parser};

use crate::model::{ClassModel, ExtractedUnit, MethodModel, NamespaceModel, ParameterModel};

/// Why a source unit produced no scaffolds.
///
/// The underlying syntax errors are exposed as related diagnostics, so a `miette::Report` of this error
/// renders each of them.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum GenerationError {
    #[error("source could not be tokenized ({} error(s))", .0.len())]
    #[diagnostic(code(stubgen::lex), help("check for unterminated strings, characters or comments"))]
    Lex(#[related] Vec<SyntaxError>),
    #[error("source could not be parsed ({} error(s))", .0.len())]
    #[diagnostic(code(stubgen::parse), help("the file ends inside an unterminated declaration"))]
    Parse(#[related] Vec<SyntaxError>),
}

impl GenerationError {
    pub fn errors(&self) -> &[SyntaxError] {
        match self {
            GenerationError::Lex(errors) | GenerationError::Parse(errors) => errors,
        }
    }

    /// Render every underlying diagnostic against `source`.
    pub fn render(&self, file_name: &str, source: &str) -> String {
        diagnostics::render(file_name, source, self.errors())
    }
}

/// Parse `source` and collect its namespace context and class models.
///
/// ## Errors
///
/// - [`GenerationError::Lex`] if the text cannot be tokenized
/// - [`GenerationError::Parse`] if input ends inside an unterminated declaration
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn extract(source: &str) -> Result<ExtractedUnit, GenerationError> {
    let tokens = lexer::lex(source).map_err(GenerationError::Lex)?;
    let output = parser::parse(&tokens).map_err(GenerationError::Parse)?;
    for diagnostic in &output.diagnostics {
        let (line, col) = diagnostics::line_col(source, diagnostic.span.start);
        tracing::warn!(line, col, "skipped malformed declaration: {}", diagnostic.message);
    }

    let unit = extract_unit(&output.unit);
    tracing::debug!(classes = unit.classes.len(), namespace = %unit.namespace.name, "extracted source unit");
    Ok(unit)
}

/// Build the models of an already parsed compilation unit.
pub fn extract_unit(unit: &CompilationUnit) -> ExtractedUnit {
    let mut walker = Walker::default();
    walker.imports.extend(unit.usings.iter().map(|u| u.node.to_string()));
    walker.namespace_members(&unit.members, "");
    ExtractedUnit {
        namespace: NamespaceModel {
            name: walker.first_namespace.unwrap_or_default(),
            imports: walker.imports,
        },
        classes: walker.classes,
    }
}

#[derive(Default)]
struct Walker {
    first_namespace: Option<String>,
    imports: Vec<String>,
    classes: Vec<ClassModel>,
}

impl Walker {
    fn namespace_members(&mut self, members: &[Spanned<NamespaceMember>], namespace: &str) {
        for member in members {
            match &member.node {
                NamespaceMember::Namespace(ns) => {
                    self.first_namespace.get_or_insert_with(|| ns.name.clone());
                    self.imports.extend(ns.usings.iter().map(|u| u.node.to_string()));
                    self.namespace_members(&ns.members, &ns.name);
                }
                NamespaceMember::Type(decl) => self.type_decl(decl, namespace),
            }
        }
    }

    fn type_decl(&mut self, decl: &TypeDecl, namespace: &str) {
        if decl.kind == TypeKind::Class {
            self.classes.push(class_model(decl, namespace));
        }
        for member in &decl.members {
            if let Member::Type(nested) = &member.node {
                self.type_decl(nested, namespace);
            }
        }
    }
}

fn class_model(decl: &TypeDecl, namespace: &str) -> ClassModel {
    let methods = decl
        .members
        .iter()
        .filter_map(|m| match &m.node {
            Member::Method(method) if method.modifiers.is_public() => Some(method_model(method)),
            _ => None,
        })
        .collect();

    ClassModel {
        namespace: namespace.to_string(),
        name: decl.name.clone(),
        constructor_parameters: select_constructor(decl).map(parameter_models).unwrap_or_default(),
        methods,
    }
}

fn method_model(method: &MethodDecl) -> MethodModel {
    MethodModel {
        name: method.name.clone(),
        return_type: method.return_type.clone(),
        parameters: parameter_models(&method.parameters),
    }
}

fn parameter_models(parameters: &[Spanned<Parameter>]) -> Vec<ParameterModel> {
    parameters
        .iter()
        .enumerate()
        .map(|(position, p)| ParameterModel {
            name: p.node.name.clone(),
            ty: p.node.ty.clone(),
            position,
            modifier: p.node.modifier,
        })
        .collect()
}

fn is_instance_public(ctor: &ConstructorDecl) -> bool {
    ctor.modifiers.is_public() && !ctor.modifiers.contains(KeywordId::Static)
}

/// Parameter list of the public constructor with the fewest parameters; the first one wins ties. A primary
/// constructor counts as declared before every body member.
fn select_constructor(decl: &TypeDecl) -> Option<&[Spanned<Parameter>]> {
    let primary = decl
        .modifiers
        .is_public()
        .then_some(decl.primary_parameters.as_deref())
        .flatten();
    let declared = decl.members.iter().filter_map(|m| match &m.node {
        Member::Constructor(ctor) if is_instance_public(ctor) => Some(ctor.parameters.as_slice()),
        _ => None,
    });

    let mut best: Option<&[Spanned<Parameter>]> = None;
    for candidate in primary.into_iter().chain(declared) {
        match best {
            Some(current) if current.len() <= candidate.len() => {}
            _ => best = Some(candidate),
        }
    }
    best
}
