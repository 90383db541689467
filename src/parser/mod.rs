pub mod decorator;
pub mod params;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

use crate::error::TranspileError;
use crate::transpiler::ast::*;
use crate::transpiler::body::translate_body;
use crate::transpiler::converter::{infer_type, map_type};
use crate::transpiler::ContractBuilder;
use decorator::DecoratorKind;
use params::parse_parameters;

#[derive(Parser)]
#[grammar = "parser/dialect.pest"]
pub struct DialectParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Import(&'a str),
    Class {
        name: &'a str,
        parents: Vec<&'a str>,
    },
    Decorator(DecoratorKind),
    Def {
        name: &'a str,
        params: Vec<Parameter>,
        returns: Option<String>,
    },
    SelfAttr {
        name: &'a str,
        annotation: Option<&'a str>,
        value: &'a str,
    },
    Annotated {
        name: &'a str,
        annotation: &'a str,
        value: Option<&'a str>,
    },
    Assign {
        name: &'a str,
        value: &'a str,
    },
    Other,
}

pub fn classify(text: &str) -> Line<'_> {
    let pair = DialectParser::parse(Rule::statement, text)
        .ok()
        .and_then(|mut pairs| pairs.next())
        .and_then(|statement| statement.into_inner().find(|p| p.as_rule() != Rule::EOI));

    match pair {
        Some(pair) => line_from_pair(pair),
        None => Line::Other,
    }
}

fn line_from_pair(pair: Pair<'_, Rule>) -> Line<'_> {
    let rule = pair.as_rule();
    let text = pair.as_str();
    let parts: Vec<_> = pair.into_inner().collect();

    match rule {
        Rule::import_stmt => Line::Import(text),
        Rule::class_header => Line::Class {
            name: find(&parts, Rule::identifier).unwrap_or_default(),
            parents: find(&parts, Rule::group_text)
                .map(|group| group.split(',').map(str::trim).filter(|p| !p.is_empty()).collect())
                .unwrap_or_default(),
        },
        Rule::decorator => {
            let name = find(&parts, Rule::dotted_name).unwrap_or_default();
            let args = find_nested(&parts, Rule::decorator_args, Rule::group_text);
            Line::Decorator(DecoratorKind::from_parts(name, args))
        }
        Rule::def_header => Line::Def {
            name: find(&parts, Rule::identifier).unwrap_or_default(),
            params: parse_parameters(find(&parts, Rule::group_text).unwrap_or_default()),
            returns: find_nested(&parts, Rule::return_type, Rule::type_text).map(map_type),
        },
        Rule::self_attr => Line::SelfAttr {
            name: find(&parts, Rule::identifier).unwrap_or_default(),
            annotation: find_nested(&parts, Rule::attr_type, Rule::type_text),
            value: find(&parts, Rule::value_text).unwrap_or_default(),
        },
        Rule::annotated_attr => Line::Annotated {
            name: find(&parts, Rule::identifier).unwrap_or_default(),
            annotation: find_nested(&parts, Rule::attr_type, Rule::type_text).unwrap_or_default(),
            value: find(&parts, Rule::value_text),
        },
        Rule::plain_attr => Line::Assign {
            name: find(&parts, Rule::identifier).unwrap_or_default(),
            value: find(&parts, Rule::value_text).unwrap_or_default(),
        },
        _ => Line::Other,
    }
}

fn find<'i>(parts: &[Pair<'i, Rule>], rule: Rule) -> Option<&'i str> {
    parts.iter().find(|p| p.as_rule() == rule).map(|p| p.as_str().trim())
}

fn find_nested<'i>(parts: &[Pair<'i, Rule>], outer: Rule, inner: Rule) -> Option<&'i str> {
    parts
        .iter()
        .find(|p| p.as_rule() == outer)
        .and_then(|p| p.clone().into_inner().find(|q| q.as_rule() == inner))
        .map(|q| q.as_str().trim())
}

pub fn parse(source: &str) -> Result<ContractModel, TranspileError> {
    if source.trim().is_empty() {
        return Err(TranspileError::EmptySource);
    }
    let mut builder = ContractBuilder::new();
    parse_into(source, &mut builder);
    builder.finish()
}

pub fn parse_into(source: &str, builder: &mut ContractBuilder) {
    let lines = logical_lines(source);
    let mut walker = LineWalker::new(builder);
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        i += 1;

        walker.close_if_dedented(line.indent);
        walker.leave_class_if_dedented(line.indent);
        if walker.skip_event_body(line.indent) {
            continue;
        }

        let kind = classify(line.text);
        if !matches!(kind, Line::Decorator(_) | Line::Def { .. }) {
            walker.decorators.clear();
        }

        match kind {
            Line::Import(statement) => walker.builder.record_import(statement),
            Line::Class { name, parents } => walker.open_class(name, &parents, line.indent),
            Line::Decorator(DecoratorKind::Event) => {
                // The header after `@event` declares an event, not a function.
                if let Some(next) = lines.get(i) {
                    if let Line::Def { name, params, .. } = classify(next.text) {
                        walker.open_event(name, params, next.indent);
                        i += 1;
                    }
                }
            }
            Line::Decorator(decorator) => walker.decorators.push(decorator),
            Line::Def {
                name,
                params,
                returns,
            } => walker.open_function(name, params, returns, line.indent),
            Line::SelfAttr {
                name,
                annotation,
                value,
            } => walker.self_attribute(line, name, annotation, value),
            Line::Annotated {
                name,
                annotation,
                value,
            } => walker.class_attribute(line, name, map_type(annotation), value),
            Line::Assign { name, value } => {
                walker.class_attribute(line, name, infer_type(value), Some(value))
            }
            Line::Other => walker.body_line(line),
        }
    }

    walker.close_function();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    Class,
    Function,
    /// Inside the stub body of an `@event` header; deeper lines are dropped.
    Event { indent: usize },
}

struct SourceLine<'a> {
    indent: usize,
    text: &'a str,
}

struct OpenFunction {
    spec: FunctionSpec,
    indent: usize,
    body_indent: Option<usize>,
    lines: Vec<String>,
}

struct LineWalker<'b> {
    builder: &'b mut ContractBuilder,
    context: Context,
    class_indent: Option<usize>,
    decorators: Vec<DecoratorKind>,
    function: Option<OpenFunction>,
}

impl<'b> LineWalker<'b> {
    fn new(builder: &'b mut ContractBuilder) -> Self {
        LineWalker {
            builder,
            context: Context::None,
            class_indent: None,
            decorators: Vec::new(),
            function: None,
        }
    }

    fn outer_context(&self) -> Context {
        if self.class_indent.is_some() {
            Context::Class
        } else {
            Context::None
        }
    }

    fn close_if_dedented(&mut self, indent: usize) {
        if matches!(&self.function, Some(f) if indent <= f.indent) {
            self.close_function();
        }
    }

    fn leave_class_if_dedented(&mut self, indent: usize) {
        if matches!(self.class_indent, Some(header) if indent <= header) {
            self.class_indent = None;
            if self.context == Context::Class {
                self.context = Context::None;
            }
        }
    }

    fn skip_event_body(&mut self, indent: usize) -> bool {
        match self.context {
            Context::Event { indent: header } if indent > header => true,
            Context::Event { .. } => {
                self.context = self.outer_context();
                false
            }
            _ => false,
        }
    }

    fn close_function(&mut self) {
        if let Some(open) = self.function.take() {
            let mut spec = open.spec;
            spec.body = translate_body(&open.lines);
            self.builder.add_function(spec);
            self.context = self.outer_context();
        }
    }

    fn open_class(&mut self, name: &str, parents: &[&str], indent: usize) {
        self.close_function();
        self.builder.set_contract(name, parents);
        self.class_indent = Some(indent);
        self.context = Context::Class;
    }

    fn open_event(&mut self, name: &str, params: Vec<Parameter>, indent: usize) {
        self.close_function();
        self.decorators.clear();
        if self.class_indent.is_some() {
            self.builder.add_event(Event {
                name: name.to_string(),
                params,
            });
        } else {
            debug!("Skipping event {} outside the contract class", name);
        }
        self.context = Context::Event { indent };
    }

    fn open_function(
        &mut self,
        name: &str,
        params: Vec<Parameter>,
        returns: Option<String>,
        indent: usize,
    ) {
        self.close_function();
        if self.class_indent.is_none() {
            debug!("Skipping function {} outside the contract class", name);
            self.decorators.clear();
            return;
        }

        let mut spec = FunctionSpec::new(name);
        spec.params = params;
        spec.returns = returns;
        for decorator in self.decorators.drain(..) {
            decorator.apply(&mut spec);
        }

        self.function = Some(OpenFunction {
            spec,
            indent,
            body_indent: None,
            lines: Vec::new(),
        });
        self.context = Context::Function;
    }

    fn in_constructor(&self) -> bool {
        matches!(&self.function, Some(f) if f.spec.is_constructor())
    }

    fn self_attribute(
        &mut self,
        line: &SourceLine<'_>,
        name: &str,
        annotation: Option<&str>,
        value: &str,
    ) {
        if !self.in_constructor() {
            self.body_line(line);
            return;
        }

        let constructor_param = self
            .function
            .as_ref()
            .and_then(|f| f.spec.params.iter().find(|p| p.name == value));

        // Constructor arguments cannot initialize a declaration.
        let (var_type, value) = match (annotation, constructor_param) {
            (Some(annotation), Some(_)) => (map_type(annotation), None),
            (Some(annotation), None) => (map_type(annotation), Some(value)),
            (None, Some(param)) => (param.param_type.clone(), None),
            (None, None) => (infer_type(value), Some(value)),
        };

        self.builder.add_state_variable(StateVariable {
            name: name.to_string(),
            var_type,
            visibility: Visibility::Public,
            value: value.map(str::to_string),
        });
    }

    fn class_attribute(
        &mut self,
        line: &SourceLine<'_>,
        name: &str,
        var_type: String,
        value: Option<&str>,
    ) {
        match self.context {
            Context::Class => self.builder.add_state_variable(StateVariable {
                name: name.to_string(),
                var_type,
                visibility: Visibility::Public,
                value: value.map(str::to_string),
            }),
            Context::Function => self.body_line(line),
            Context::None | Context::Event { .. } => {
                debug!("Skipping module-level assignment to {}", name);
            }
        }
    }

    fn body_line(&mut self, line: &SourceLine<'_>) {
        let in_constructor = self.in_constructor();
        match &mut self.function {
            Some(open) if !in_constructor => {
                let base = *open.body_indent.get_or_insert(line.indent);
                let relative = line.indent.saturating_sub(base);
                open.lines.push(format!("{}{}", " ".repeat(relative), line.text));
            }
            _ => debug!("Skipping line outside a function body: {}", line.text),
        }
    }
}

fn logical_lines(source: &str) -> Vec<SourceLine<'_>> {
    const DOCSTRING_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

    let mut lines = Vec::new();
    let mut docstring: Option<&str> = None;

    for raw in source.lines() {
        if let Some(quote) = docstring {
            if raw.contains(quote) {
                docstring = None;
            }
            continue;
        }

        let code = strip_comment(raw).trim_end();
        let text = code.trim_start();
        if text.is_empty() {
            continue;
        }

        if let Some(quote) = DOCSTRING_QUOTES.into_iter().find(|q| text.starts_with(q)) {
            if !text[quote.len()..].contains(quote) {
                docstring = Some(quote);
            }
            continue;
        }

        lines.push(SourceLine {
            indent: indent_width(code),
            text,
        });
    }

    lines
}

fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return &line[..i],
            None => {}
        }
    }
    line
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
