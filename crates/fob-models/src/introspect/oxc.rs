//! TypeScript declarations read with the oxc parser.
//!
//! Sources are parsed up front so that type aliases and enums declared in
//! one file are visible while shaping types in another.

use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, Class, ClassElement, Expression, FormalParameters, MethodDefinitionKind,
    Program, Statement, TSInterfaceDeclaration, TSMethodSignatureKind, TSSignature, TSType,
    TSTypeAliasDeclaration, TSTypeAnnotation, TSTypeLiteral, TSTypeOperatorOperator,
    TSTypeParameterDeclaration, TSTypeReference,
};
use oxc_ast::ast::{Declaration as AstDeclaration, ExportDefaultDeclarationKind, TSEnumDeclaration};
use oxc_ast::ast::{TSModuleDeclaration, TSModuleDeclarationBody};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use super::{
    Declaration, DeclarationSet, HeritageClause, Member, MemberKind, Parameter, Signature,
    TypeArgument, TypeAtom, TypeExpr, TypeIntrospector, TypeParameter,
};
use crate::error::{ModelsError, Result};

/// Introspects TypeScript sources parsed with oxc.
#[derive(Debug, Clone, Default)]
pub struct OxcIntrospector {
    sources: Vec<SourceFile>,
}

#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    text: String,
}

impl OxcIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an in-memory source. The path only picks the source type and
    /// labels diagnostics.
    pub fn add_source(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> &mut Self {
        self.sources.push(SourceFile {
            path: path.into(),
            text: text.into(),
        });
        self
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.add_source(path, text);
        self
    }

    /// Read a source file from disk.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|error| ModelsError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(self.add_source(path, text))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl TypeIntrospector for OxcIntrospector {
    fn declarations(&self) -> Result<DeclarationSet> {
        let allocators: Vec<Allocator> =
            self.sources.iter().map(|_| Allocator::default()).collect();
        let files = self
            .sources
            .iter()
            .zip(&allocators)
            .map(|(source, allocator)| source.parse(allocator))
            .collect::<Result<Vec<_>>>()?;

        let index = TypeIndex::build(&files);
        let mut converter = TypeConverter::new(&index);
        let mut set = DeclarationSet::new();

        for file in &files {
            let scope = Scope::new(file.text);
            walk(&file.program.body, &mut |item| match item {
                Item::Interface(interface) => set.push(converter.interface(interface, &scope)),
                Item::TypeAlias(alias) => set.push(converter.type_alias(alias, &scope)),
                Item::Class(class) => match converter.class(class, &scope) {
                    Some(declaration) => set.push(declaration),
                    None => trace!(path = %file.path.display(), "skipping anonymous class"),
                },
                Item::Enum(_) => {}
            });
        }

        debug!(
            files = files.len(),
            interfaces = set.interfaces.len(),
            type_aliases = set.type_aliases.len(),
            classes = set.classes.len(),
            "introspected sources"
        );
        Ok(set)
    }
}

struct ParsedFile<'a> {
    path: &'a Path,
    text: &'a str,
    program: Program<'a>,
}

impl SourceFile {
    fn parse<'a>(&'a self, allocator: &'a Allocator) -> Result<ParsedFile<'a>> {
        let source_type = SourceType::from_path(&self.path).unwrap_or_else(|_| SourceType::ts());
        let parsed = Parser::new(allocator, &self.text, source_type).parse();

        if parsed.panicked || !parsed.errors.is_empty() {
            let diagnostics: Vec<String> = parsed.errors.iter().map(ToString::to_string).collect();
            return Err(ModelsError::parse_error(self.path.clone(), &diagnostics));
        }

        Ok(ParsedFile {
            path: &self.path,
            text: &self.text,
            program: parsed.program,
        })
    }
}

/// A declaration reachable from the top level of a program.
#[derive(Clone, Copy)]
enum Item<'b, 'a> {
    Interface(&'b TSInterfaceDeclaration<'a>),
    TypeAlias(&'b TSTypeAliasDeclaration<'a>),
    Class(&'b Class<'a>),
    Enum(&'b TSEnumDeclaration<'a>),
}

/// Visits declarations in source order, descending into exports and
/// namespace blocks.
fn walk<'b, 'a, F>(statements: &'b [Statement<'a>], visit: &mut F)
where
    F: FnMut(Item<'b, 'a>),
{
    for statement in statements {
        match statement {
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    walk_declaration(declaration, visit);
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ClassDeclaration(class) => visit(Item::Class(class)),
                ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                    visit(Item::Interface(interface))
                }
                _ => {}
            },
            _ => {
                if let Some(declaration) = statement.as_declaration() {
                    walk_declaration(declaration, visit);
                }
            }
        }
    }
}

fn walk_declaration<'b, 'a, F>(declaration: &'b AstDeclaration<'a>, visit: &mut F)
where
    F: FnMut(Item<'b, 'a>),
{
    match declaration {
        AstDeclaration::TSInterfaceDeclaration(interface) => visit(Item::Interface(interface)),
        AstDeclaration::TSTypeAliasDeclaration(alias) => visit(Item::TypeAlias(alias)),
        AstDeclaration::ClassDeclaration(class) => visit(Item::Class(class)),
        AstDeclaration::TSEnumDeclaration(enumeration) => visit(Item::Enum(enumeration)),
        AstDeclaration::TSModuleDeclaration(module) => walk_module(module, visit),
        AstDeclaration::TSGlobalDeclaration(global) => walk(&global.body.body, visit),
        _ => {}
    }
}

fn walk_module<'b, 'a, F>(module: &'b TSModuleDeclaration<'a>, visit: &mut F)
where
    F: FnMut(Item<'b, 'a>),
{
    match &module.body {
        Some(TSModuleDeclarationBody::TSModuleBlock(block)) => walk(&block.body, visit),
        Some(TSModuleDeclarationBody::TSModuleDeclaration(nested)) => walk_module(nested, visit),
        None => {}
    }
}

/// Aliases and enums of every parsed file, by simple name.
struct TypeIndex<'b, 'a> {
    enums: FxHashSet<&'b str>,
    aliases: FxHashMap<&'b str, AliasEntry<'b, 'a>>,
}

#[derive(Clone, Copy)]
struct AliasEntry<'b, 'a> {
    declaration: &'b TSTypeAliasDeclaration<'a>,
    source: &'b str,
}

impl<'b, 'a> TypeIndex<'b, 'a> {
    fn build(files: &'b [ParsedFile<'a>]) -> Self {
        let mut index = Self {
            enums: FxHashSet::default(),
            aliases: FxHashMap::default(),
        };
        for file in files {
            walk(&file.program.body, &mut |item| match item {
                Item::Enum(enumeration) => {
                    index.enums.insert(enumeration.id.name.as_str());
                }
                Item::TypeAlias(declaration) => {
                    index
                        .aliases
                        .entry(declaration.id.name.as_str())
                        .or_insert(AliasEntry {
                            declaration,
                            source: file.text,
                        });
                }
                Item::Interface(_) | Item::Class(_) => {}
            });
        }
        index
    }
}

/// Source text and type-parameter bindings a type is read in.
struct Scope<'s> {
    source: &'s str,
    bindings: FxHashMap<String, TypeExpr>,
}

impl<'s> Scope<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            bindings: FxHashMap::default(),
        }
    }

    fn text(&self, span: Span) -> &'s str {
        span.source_text(self.source)
    }
}

fn any() -> TypeExpr {
    TypeExpr::atom("any", TypeAtom::Any)
}

struct TypeConverter<'i, 'b, 'a> {
    index: &'i TypeIndex<'b, 'a>,
    /// Aliases currently being expanded.
    expanding: Vec<String>,
    /// Finished alias bodies per alias name, keyed by the bound argument types.
    expansions: FxHashMap<String, Vec<(Vec<TypeExpr>, TypeExpr)>>,
    /// Count of alias references left unexpanded because they close a cycle.
    cycle_cuts: usize,
}

impl<'i, 'b, 'a> TypeConverter<'i, 'b, 'a> {
    fn new(index: &'i TypeIndex<'b, 'a>) -> Self {
        Self {
            index,
            expanding: Vec::new(),
            expansions: FxHashMap::default(),
            cycle_cuts: 0,
        }
    }
}

impl<'a> TypeConverter<'_, '_, 'a> {
    fn interface(
        &mut self,
        interface: &TSInterfaceDeclaration<'a>,
        scope: &Scope<'_>,
    ) -> Declaration {
        let mut declaration = Declaration::interface(interface.id.name.as_str());
        declaration.type_parameters = type_parameters(interface.type_parameters.as_deref(), scope);
        declaration.extends = interface
            .extends
            .iter()
            .map(|heritage| {
                HeritageClause::new(
                    scope.text(heritage.expression.span()),
                    scope.text(heritage.span),
                )
            })
            .collect();

        let mut members = Members::default();
        self.signature_members(&interface.body.body, scope, &mut members);
        declaration.members = members.finish();
        declaration
    }

    fn class(&mut self, class: &Class<'a>, scope: &Scope<'_>) -> Option<Declaration> {
        let id = class.id.as_ref()?;
        let mut declaration = Declaration::class(id.name.as_str());
        declaration.type_parameters = type_parameters(class.type_parameters.as_deref(), scope);

        if let Some(superclass) = &class.super_class {
            let span = superclass.span();
            let end = class
                .super_type_arguments
                .as_ref()
                .map_or(span.end, |arguments| arguments.span.end);
            declaration.extends.push(HeritageClause::new(
                scope.text(span),
                scope.text(Span::new(span.start, end)),
            ));
        }
        declaration.implements = class
            .implements
            .iter()
            .map(|clause| {
                HeritageClause::new(scope.text(clause.expression.span()), scope.text(clause.span))
            })
            .collect();

        let mut members = Members::default();
        for element in &class.body.body {
            match element {
                ClassElement::PropertyDefinition(property) if !property.r#static => {
                    let Some(name) = property.key.static_name() else {
                        continue;
                    };
                    let annotation = property.type_annotation.as_deref();
                    let ty = self.property_type(annotation, property.value.as_ref(), scope);
                    members.push(with_written(Member::property(name, ty), annotation, scope));
                }
                ClassElement::AccessorProperty(property) if !property.r#static => {
                    let Some(name) = property.key.static_name() else {
                        continue;
                    };
                    let annotation = property.type_annotation.as_deref();
                    let ty = self.property_type(annotation, property.value.as_ref(), scope);
                    members.push(with_written(Member::property(name, ty), annotation, scope));
                }
                ClassElement::MethodDefinition(method) if !method.r#static => {
                    let Some(name) = method.key.static_name() else {
                        continue;
                    };
                    let function = &method.value;
                    match method.kind {
                        MethodDefinitionKind::Constructor => {}
                        MethodDefinitionKind::Method => {
                            let signature = self.signature(
                                &function.params,
                                function.return_type.as_deref(),
                                scope,
                            );
                            let implemented = function.body.is_some();
                            members.push_method(name.into_owned(), signature, implemented);
                        }
                        MethodDefinitionKind::Get => {
                            let ty = self.annotation(function.return_type.as_deref(), scope);
                            members.push_accessor(Member::new(name, MemberKind::GetAccessor, ty));
                        }
                        MethodDefinitionKind::Set => {
                            let ty = self.setter_type(&function.params, scope);
                            members.push_accessor(Member::new(name, MemberKind::SetAccessor, ty));
                        }
                    }
                }
                _ => {}
            }
        }
        declaration.members = members.finish();
        Some(declaration)
    }

    fn type_alias(&mut self, alias: &TSTypeAliasDeclaration<'a>, scope: &Scope<'_>) -> Declaration {
        let name = alias.id.name.as_str();

        self.expanding.push(name.to_string());
        let aliased = self.convert(&alias.type_annotation, scope);
        let mut members = Members::default();
        for literal in object_literals(&alias.type_annotation) {
            self.signature_members(&literal.members, scope, &mut members);
        }
        self.expanding.pop();

        let mut declaration = Declaration::type_alias(name, aliased);
        declaration.type_parameters = type_parameters(alias.type_parameters.as_deref(), scope);
        declaration.members = members.finish();
        declaration
    }

    fn signature_members(
        &mut self,
        signatures: &[TSSignature<'a>],
        scope: &Scope<'_>,
        members: &mut Members,
    ) {
        for signature in signatures {
            match signature {
                TSSignature::TSPropertySignature(property) => {
                    let Some(name) = property.key.static_name() else {
                        continue;
                    };
                    let annotation = property.type_annotation.as_deref();
                    let ty = self.annotation(annotation, scope);
                    let member = match annotation {
                        Some(annotation) => Member::new(name, MemberKind::PropertySignature, ty)
                            .with_annotation(scope.text(annotation.type_annotation.span())),
                        None => Member::property_signature(name, ty),
                    };
                    members.push(member);
                }
                TSSignature::TSMethodSignature(method) => {
                    let Some(name) = method.key.static_name() else {
                        continue;
                    };
                    match method.kind {
                        TSMethodSignatureKind::Method => {
                            let signature = self.signature(
                                &method.params,
                                method.return_type.as_deref(),
                                scope,
                            );
                            members.push_method(name.into_owned(), signature, false);
                        }
                        TSMethodSignatureKind::Get => {
                            let ty = self.annotation(method.return_type.as_deref(), scope);
                            members.push_accessor(Member::new(name, MemberKind::GetAccessor, ty));
                        }
                        TSMethodSignatureKind::Set => {
                            let ty = self.setter_type(&method.params, scope);
                            members.push_accessor(Member::new(name, MemberKind::SetAccessor, ty));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn convert(&mut self, ty: &TSType<'a>, scope: &Scope<'_>) -> TypeExpr {
        let text = scope.text(ty.span());
        match ty {
            TSType::TSAnyKeyword(_) => TypeExpr::atom(text, TypeAtom::Any),
            TSType::TSUnknownKeyword(_) => TypeExpr::atom(text, TypeAtom::Unknown),
            TSType::TSNeverKeyword(_) => TypeExpr::atom(text, TypeAtom::Never),
            TSType::TSNullKeyword(_) => TypeExpr::atom(text, TypeAtom::Null),
            TSType::TSUndefinedKeyword(_) => TypeExpr::atom(text, TypeAtom::Undefined),
            TSType::TSStringKeyword(_)
            | TSType::TSNumberKeyword(_)
            | TSType::TSBooleanKeyword(_)
            | TSType::TSBigIntKeyword(_)
            | TSType::TSSymbolKeyword(_)
            | TSType::TSObjectKeyword(_)
            | TSType::TSVoidKeyword(_)
            | TSType::TSIntrinsicKeyword(_) => TypeExpr::atom(text, TypeAtom::Primitive),
            TSType::TSLiteralType(_) | TSType::TSTemplateLiteralType(_) => {
                TypeExpr::atom(text, TypeAtom::Literal)
            }
            TSType::TSUnionType(_) => TypeExpr::atom(text, TypeAtom::Union),
            TSType::TSParenthesizedType(parenthesized) => {
                self.convert(&parenthesized.type_annotation, scope)
            }
            TSType::TSArrayType(array) => {
                TypeExpr::array(text, self.convert(&array.element_type, scope))
            }
            TSType::TSTypeOperatorType(operator) => match operator.operator {
                TSTypeOperatorOperator::Readonly => {
                    let inner = self.convert(&operator.type_annotation, scope);
                    if inner.array_element().is_some() {
                        inner.with_text(text)
                    } else {
                        TypeExpr::named(text)
                    }
                }
                TSTypeOperatorOperator::Keyof => TypeExpr::atom(text, TypeAtom::Union),
                TSTypeOperatorOperator::Unique => TypeExpr::atom(text, TypeAtom::Primitive),
            },
            TSType::TSFunctionType(function) => {
                let signature =
                    self.signature(&function.params, Some(&*function.return_type), scope);
                TypeExpr::function(text, signature)
            }
            TSType::TSTypeLiteral(literal) => {
                TypeExpr::named(text).with_signatures(self.call_signatures(literal, scope))
            }
            TSType::TSTypeReference(reference) => self.reference(reference, text, scope),
            _ => TypeExpr::named(text),
        }
    }

    fn reference(
        &mut self,
        reference: &TSTypeReference<'a>,
        text: &str,
        scope: &Scope<'_>,
    ) -> TypeExpr {
        let name = scope.text(reference.type_name.span());
        let params: &[TSType<'a>] = match reference.type_arguments.as_deref() {
            Some(arguments) => &arguments.params,
            None => &[],
        };

        if params.is_empty() {
            if let Some(bound) = scope.bindings.get(name) {
                return bound.clone();
            }
        }
        if let ("Array" | "ReadonlyArray", [element]) = (name, params) {
            return TypeExpr::array(text, self.convert(element, scope));
        }

        let index = self.index;
        if index.enums.contains(name) {
            return TypeExpr::atom(text, TypeAtom::Enum);
        }

        let arguments: Vec<TypeArgument> = params
            .iter()
            .map(|param| self.argument(param, scope))
            .collect();
        match index.aliases.get(name) {
            Some(alias) => self.expand(name, *alias, arguments, text),
            None => TypeExpr::generic(text, name, arguments),
        }
    }

    /// A type argument keeps its spelling when it is a plain type reference.
    fn argument(&mut self, ty: &TSType<'a>, scope: &Scope<'_>) -> TypeArgument {
        let converted = self.convert(ty, scope);
        match ty {
            TSType::TSTypeReference(reference)
                if reference.type_arguments.is_some()
                    || !scope
                        .bindings
                        .contains_key(scope.text(reference.type_name.span())) =>
            {
                TypeArgument::written(converted, scope.text(reference.span))
            }
            _ => TypeArgument::new(converted),
        }
    }

    fn expand(
        &mut self,
        name: &str,
        alias: AliasEntry<'_, 'a>,
        arguments: Vec<TypeArgument>,
        text: &str,
    ) -> TypeExpr {
        if self.expanding.iter().any(|active| active == name) {
            trace!(alias = name, "alias refers back to itself; not expanding");
            self.cycle_cuts += 1;
            return TypeExpr::named(text)
                .with_alias_symbol(name)
                .with_type_arguments(arguments);
        }

        let key: Vec<TypeExpr> = arguments.iter().map(|argument| argument.ty.clone()).collect();
        let body = match self.cached(name, &key) {
            Some(body) => body,
            None => {
                let cuts = self.cycle_cuts;
                let body = self.expand_body(name, alias, &key);
                // A body cut short by a cycle depends on where the cycle was
                // entered and is not reused.
                if self.cycle_cuts == cuts {
                    self.expansions
                        .entry(name.to_string())
                        .or_default()
                        .push((key, body.clone()));
                }
                body
            }
        };

        body.with_text(text)
            .with_alias_symbol(name)
            .with_type_arguments(arguments)
    }

    fn cached(&self, name: &str, key: &[TypeExpr]) -> Option<TypeExpr> {
        self.expansions
            .get(name)?
            .iter()
            .find(|(arguments, _)| arguments.as_slice() == key)
            .map(|(_, body)| body.clone())
    }

    /// The alias body with its type parameters bound to `arguments`, missing
    /// ones falling back to their defaults or `any`.
    fn expand_body(
        &mut self,
        name: &str,
        alias: AliasEntry<'_, 'a>,
        arguments: &[TypeExpr],
    ) -> TypeExpr {
        let mut scope = Scope::new(alias.source);
        if let Some(parameters) = alias.declaration.type_parameters.as_deref() {
            for (position, parameter) in parameters.params.iter().enumerate() {
                let bound = match (arguments.get(position), &parameter.default) {
                    (Some(argument), _) => argument.clone(),
                    (None, Some(default)) => self.convert(default, &scope),
                    (None, None) => any(),
                };
                scope.bindings.insert(parameter.name.name.to_string(), bound);
            }
        }

        self.expanding.push(name.to_string());
        let body = self.convert(&alias.declaration.type_annotation, &scope);
        self.expanding.pop();
        body
    }

    /// Signatures of an object literal made only of call signatures.
    fn call_signatures(
        &mut self,
        literal: &TSTypeLiteral<'a>,
        scope: &Scope<'_>,
    ) -> Vec<Signature> {
        let mut signatures = Vec::new();
        for member in &literal.members {
            let TSSignature::TSCallSignatureDeclaration(call) = member else {
                return Vec::new();
            };
            signatures.push(self.signature(&call.params, call.return_type.as_deref(), scope));
        }
        signatures
    }

    fn signature(
        &mut self,
        params: &FormalParameters<'a>,
        return_type: Option<&TSTypeAnnotation<'a>>,
        scope: &Scope<'_>,
    ) -> Signature {
        let mut parameters: Vec<Parameter> = params
            .items
            .iter()
            .enumerate()
            .map(|(position, param)| {
                Parameter::new(
                    binding_name(&param.pattern, position),
                    self.annotation(param.type_annotation.as_deref(), scope),
                )
            })
            .collect();

        if let Some(rest) = params.rest.as_deref() {
            let name = binding_name(&rest.rest.argument, parameters.len());
            let ty = match rest.type_annotation.as_deref() {
                Some(annotation) => self.convert(&annotation.type_annotation, scope),
                None => TypeExpr::array("any[]", any()),
            };
            parameters.push(Parameter::new(name, ty));
        }

        Signature::new(parameters, self.annotation(return_type, scope))
    }

    fn setter_type(&mut self, params: &FormalParameters<'a>, scope: &Scope<'_>) -> TypeExpr {
        let annotation = params
            .items
            .first()
            .and_then(|param| param.type_annotation.as_deref());
        self.annotation(annotation, scope)
    }

    fn annotation(
        &mut self,
        annotation: Option<&TSTypeAnnotation<'a>>,
        scope: &Scope<'_>,
    ) -> TypeExpr {
        match annotation {
            Some(annotation) => self.convert(&annotation.type_annotation, scope),
            None => any(),
        }
    }

    /// Declared type of a class property, or the type of its initializer.
    fn property_type(
        &mut self,
        annotation: Option<&TSTypeAnnotation<'a>>,
        value: Option<&Expression<'a>>,
        scope: &Scope<'_>,
    ) -> TypeExpr {
        if annotation.is_some() {
            return self.annotation(annotation, scope);
        }
        match value {
            Some(Expression::NumericLiteral(_)) => TypeExpr::atom("number", TypeAtom::Primitive),
            Some(Expression::StringLiteral(_) | Expression::TemplateLiteral(_)) => {
                TypeExpr::atom("string", TypeAtom::Primitive)
            }
            Some(Expression::BooleanLiteral(_)) => TypeExpr::atom("boolean", TypeAtom::Primitive),
            Some(Expression::BigIntLiteral(_)) => TypeExpr::atom("bigint", TypeAtom::Primitive),
            Some(Expression::NewExpression(new)) => match &new.callee {
                Expression::Identifier(callee) => {
                    TypeExpr::named(callee.name.as_str()).with_symbol(callee.name.as_str())
                }
                _ => any(),
            },
            _ => any(),
        }
    }
}

fn with_written(
    member: Member,
    annotation: Option<&TSTypeAnnotation<'_>>,
    scope: &Scope<'_>,
) -> Member {
    match annotation {
        Some(annotation) => member.with_annotation(scope.text(annotation.type_annotation.span())),
        None => member,
    }
}

fn type_parameters(
    declaration: Option<&TSTypeParameterDeclaration<'_>>,
    scope: &Scope<'_>,
) -> Vec<TypeParameter> {
    declaration
        .map(|declaration| {
            declaration
                .params
                .iter()
                .map(|param| match &param.constraint {
                    Some(constraint) => TypeParameter::bounded(
                        param.name.name.as_str(),
                        scope.text(constraint.span()),
                    ),
                    None => TypeParameter::new(param.name.name.as_str()),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Destructured parameters have no name of their own.
fn binding_name(pattern: &BindingPattern<'_>, position: usize) -> String {
    match pattern {
        BindingPattern::BindingIdentifier(identifier) => identifier.name.to_string(),
        _ => format!("__{position}"),
    }
}

/// Object literals whose members an alias takes on: the body itself, or
/// every operand of an intersection made only of literals.
fn object_literals<'t, 'a>(ty: &'t TSType<'a>) -> Vec<&'t TSTypeLiteral<'a>> {
    match ty {
        TSType::TSParenthesizedType(parenthesized) => {
            object_literals(&parenthesized.type_annotation)
        }
        TSType::TSTypeLiteral(literal) => vec![&**literal],
        TSType::TSIntersectionType(intersection) => intersection
            .types
            .iter()
            .map(|operand| match object_literals(operand).as_slice() {
                [literal] => Some(*literal),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Members in declaration order, with methods grouped by name.
#[derive(Default)]
struct Members {
    slots: Vec<Slot>,
    methods: FxHashMap<String, usize>,
    accessors: FxHashSet<String>,
}

enum Slot {
    Member(Member),
    Method {
        name: String,
        overloads: Vec<Signature>,
        implementation: Option<Signature>,
    },
}

impl Members {
    fn push(&mut self, member: Member) {
        self.slots.push(Slot::Member(member));
    }

    /// A get/set pair describes one member; the first accessor wins.
    fn push_accessor(&mut self, member: Member) {
        if self.accessors.insert(member.name.clone()) {
            self.push(member);
        }
    }

    fn push_method(&mut self, name: String, signature: Signature, has_body: bool) {
        let slot = match self.methods.get(&name) {
            Some(&slot) => slot,
            None => {
                self.methods.insert(name.clone(), self.slots.len());
                self.slots.push(Slot::Method {
                    name,
                    overloads: Vec::new(),
                    implementation: None,
                });
                self.slots.len() - 1
            }
        };
        if let Slot::Method {
            overloads,
            implementation,
            ..
        } = &mut self.slots[slot]
        {
            if has_body {
                implementation.get_or_insert(signature);
            } else {
                overloads.push(signature);
            }
        }
    }

    fn finish(self) -> Vec<Member> {
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Member(member) => member,
                Slot::Method {
                    name,
                    overloads,
                    implementation,
                } => {
                    // Overload signatures hide the implementation signature.
                    let signatures = if overloads.is_empty() {
                        implementation.into_iter().collect()
                    } else {
                        overloads
                    };
                    Member::method(name, method_type(signatures))
                }
            })
            .collect()
    }
}

fn method_type(signatures: Vec<Signature>) -> TypeExpr {
    match signatures.as_slice() {
        [signature] => TypeExpr::function(signature.arrow_text(), signature.clone()),
        _ => {
            let text = format!(
                "{{ {} }}",
                signatures
                    .iter()
                    .map(|signature| format!("{};", signature.call_text()))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            TypeExpr::named(text).with_signatures(signatures)
        }
    }
}
