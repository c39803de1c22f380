//! Expression generator.
//!
//! Expressions are TypeScript snippets stored in project data. They refer
//! to data sources through encoded identifiers (`$ws$dataSource$<id>`).
//! Generation resolves those to scope names, records which data sources
//! were used, and rewrites member access to optional chaining so missing
//! data yields `undefined` instead of throwing.

use indexmap::IndexSet;
use sitegen_ir::DataSources;
use swc_common::{FileName, SourceMap, Span, Spanned, sync::Lrc};
use swc_ecma_ast::*;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::warn;

use crate::scope::Scope;

pub const DATA_SOURCE_VARIABLE_PREFIX: &str = "$ws$dataSource$";

const DASH_ENCODING: &str = "__DASH__";

/// Emitted in place of an expression that cannot be parsed.
pub const UNDEFINED: &str = "undefined";

/// Identifier that refers to data source `id` inside an expression.
pub fn encode_data_source_variable(id: &str) -> String {
    format!("{}{}", DATA_SOURCE_VARIABLE_PREFIX, id.replace('-', DASH_ENCODING))
}

/// Data source id encoded in `identifier`, if it is a reference.
pub fn decode_data_source_variable(identifier: &str) -> Option<String> {
    identifier
        .strip_prefix(DATA_SOURCE_VARIABLE_PREFIX)
        .map(|encoded| encoded.replace(DASH_ENCODING, "-"))
}

/// Generated code plus the data sources it references, in first-use order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedExpression {
    pub code: String,
    pub used: IndexSet<String>,
}

/// Generate target code for `expression`.
///
/// References to ids missing from `data_sources` are kept verbatim. An
/// unparsable expression becomes `undefined`; generation never fails.
pub fn generate_expression(
    expression: &str,
    data_sources: &DataSources,
    scope: &mut Scope,
) -> GeneratedExpression {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom("expression".to_string()).into(),
        expression.to_string(),
    );

    let syntax = Syntax::Typescript(TsSyntax {
        tsx: false,
        decorators: false,
        dts: false,
        no_early_errors: true,
        disallow_ambiguous_jsx_like: true,
    });
    let lexer = Lexer::new(syntax, EsVersion::Es2022, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let expr = match parser.parse_expr() {
        Ok(expr) => expr,
        Err(err) => {
            warn!("cannot parse expression {:?}: {:?}", expression, err);
            return undefined();
        }
    };
    if !parser.take_errors().is_empty() {
        warn!("expression {:?} has syntax errors", expression);
        return undefined();
    }

    let base = fm.start_pos.0;
    let end = (expr.span().hi.0 - base) as usize;
    if !is_trivia(&expression[end..]) {
        warn!("unexpected input after expression {:?}", expression);
        return undefined();
    }

    let mut rewriter = ExpressionRewriter {
        source: expression,
        base,
        data_sources,
        scope,
        edits: Vec::new(),
        used: IndexSet::new(),
        plain_member_depth: 0,
    };
    expr.visit_with(&mut rewriter);

    // trailing comments are dropped; a line comment would swallow
    // whatever the caller splices after the expression
    let mut code = apply_edits(&expression[..end], rewriter.edits);
    // a bare sequence would split the surrounding object literal
    if matches!(*expr, Expr::Seq(_)) {
        code = format!("({})", code);
    }

    GeneratedExpression {
        code,
        used: rewriter.used,
    }
}

fn undefined() -> GeneratedExpression {
    GeneratedExpression {
        code: UNDEFINED.to_string(),
        used: IndexSet::new(),
    }
}

/// Only whitespace and comments: the lexer yields no token at all.
fn is_trivia(rest: &str) -> bool {
    if rest.trim().is_empty() {
        return true;
    }
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom("trailing".to_string()).into(),
        rest.to_string(),
    );
    let mut lexer = Lexer::new(
        Syntax::Typescript(TsSyntax::default()),
        EsVersion::Es2022,
        StringInput::from(&*fm),
        None,
    );
    lexer.next().is_none()
}

// ── Edits ───────────────────────────────────────────────────────────

/// Replace `start..end` of the source with `text`. `start == end` inserts.
#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| (e.start, e.end));
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        output.push_str(&source[cursor..edit.start]);
        output.push_str(&edit.text);
        cursor = edit.end;
    }
    output.push_str(&source[cursor..]);
    output
}

// ── Rewriter ────────────────────────────────────────────────────────

struct ExpressionRewriter<'a> {
    source: &'a str,
    base: u32,
    data_sources: &'a DataSources,
    scope: &'a mut Scope,
    edits: Vec<Edit>,
    used: IndexSet<String>,
    /// Non-zero while inside a position where `?.` is a syntax error
    /// (assignment targets, `new` callees, template tags).
    plain_member_depth: usize,
}

impl ExpressionRewriter<'_> {
    fn offset(&self, pos: swc_common::BytePos) -> usize {
        (pos.0 - self.base) as usize
    }

    fn range(&self, span: Span) -> (usize, usize) {
        (self.offset(span.lo), self.offset(span.hi))
    }

    /// Scope name for an encoded reference to a known data source.
    fn resolve(&mut self, identifier: &str) -> Option<String> {
        let id = decode_data_source_variable(identifier)?;
        let data_source = self.data_sources.get(&id)?;
        self.used.insert(data_source.id.clone());
        Some(self.scope.get_name(&data_source.id, &data_source.name))
    }

    fn with_plain_members(&mut self, f: impl FnOnce(&mut Self)) {
        self.plain_member_depth += 1;
        f(self);
        self.plain_member_depth -= 1;
    }
}

impl Visit for ExpressionRewriter<'_> {
    fn visit_ident(&mut self, ident: &Ident) {
        if let Some(name) = self.resolve(&ident.sym) {
            let (start, end) = self.range(ident.span);
            self.edits.push(Edit {
                start,
                end,
                text: name,
            });
        }
    }

    fn visit_prop(&mut self, prop: &Prop) {
        if let Prop::Shorthand(ident) = prop {
            if let Some(name) = self.resolve(&ident.sym) {
                let (start, end) = self.range(ident.span);
                self.edits.push(Edit {
                    start,
                    end,
                    text: format!("{}: {}", ident.sym, name),
                });
            }
            return;
        }
        prop.visit_children_with(self);
    }

    fn visit_member_expr(&mut self, member: &MemberExpr) {
        member.visit_children_with(self);
        if self.plain_member_depth > 0 {
            return;
        }

        let obj_end = self.offset(member.obj.span().hi);
        match &member.prop {
            MemberProp::Ident(prop) => {
                let prop_start = self.offset(prop.span.lo);
                let between = &self.source[obj_end..prop_start];
                if between.contains("?.") {
                    return;
                }
                if let Some(dot) = between.rfind('.') {
                    self.edits.push(Edit {
                        start: obj_end + dot,
                        end: obj_end + dot,
                        text: "?".to_string(),
                    });
                }
            }
            MemberProp::Computed(prop) => {
                let bracket = self.offset(prop.span.lo);
                if self.source[obj_end..bracket].contains("?.") {
                    return;
                }
                self.edits.push(Edit {
                    start: bracket,
                    end: bracket,
                    text: "?.".to_string(),
                });
            }
            MemberProp::PrivateName(_) => {}
        }
    }

    fn visit_assign_expr(&mut self, assign: &AssignExpr) {
        self.with_plain_members(|this| assign.left.visit_with(this));
        assign.right.visit_with(self);
    }

    fn visit_update_expr(&mut self, update: &UpdateExpr) {
        self.with_plain_members(|this| update.arg.visit_with(this));
    }

    fn visit_new_expr(&mut self, new: &NewExpr) {
        self.with_plain_members(|this| new.callee.visit_with(this));
        for arg in new.args.iter().flatten() {
            arg.visit_with(self);
        }
    }

    fn visit_tagged_tpl(&mut self, tagged: &TaggedTpl) {
        self.with_plain_members(|this| tagged.tag.visit_with(this));
        tagged.tpl.visit_with(self);
    }
}
