//! Canonical printer.
//!
//! The printer keeps the line structure of its input (Go's semicolon
//! insertion depends on it) and recomputes everything else: indentation from
//! bracket nesting, spacing between tokens from their classes, and blank
//! lines collapsed to at most one. Where spacing cannot be decided from
//! tokens alone (`p *T` against `a*b`), the input's choice is kept,
//! normalized to a single space. The same holds inside a `{ ... }` pair
//! closed on its own line, where one-line blocks (`{ return }`) and composite
//! literals (`T{A: 1}`) are indistinguishable. Printing its own output is a
//! no-op.

use crate::{
    indent::Indent,
    source::SourceFile,
    token::{Token, TokenKind},
};

/// Formatting constants used when reprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub indent: Indent,
}

impl Style {
    /// gofmt's layout: one tab per level.
    pub const GO: Self = Self { indent: Indent::GO };
}

impl Default for Style {
    fn default() -> Self {
        Self::GO
    }
}

/// How an operator binds to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpMode {
    /// Unary: `-x`, `!ok`, `<-ch`.
    Prefix,
    /// Binary: `a + b`, `x := y`.
    Infix,
    /// Attached to the left: `i++`, `chan<- T`.
    Postfix,
    /// Ambiguous at token level; keep the input's spacing.
    Verbatim,
}

/// What an open bracket delimits, where it matters for spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Plain,
    /// Parameters or receiver of a function: `func (r R) M(x int)`.
    Signature,
    /// Type parameters of a function: `func F[T any]`.
    TypeParams,
    /// The method set of `interface { ... }`.
    Interface,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: TokenKind,
    role: Role,
    /// Indentation of the line the bracket was opened on.
    indent: usize,
}

/// The previously printed token and what the printer decided about it.
#[derive(Debug, Clone, Copy)]
struct Previous<'a> {
    token: &'a Token,
    mode: Option<OpMode>,
    starts_line: bool,
}

/// What [`space_between`] needs to know beyond the two tokens.
struct Context<'a> {
    mode: Option<OpMode>,
    next: Option<&'a Token>,
    frames: &'a [Frame],
    /// The bracket closed most recently.
    closed: Option<Frame>,
    /// Whether this `{` opens the block of a statement header.
    header_block: bool,
}

/// Reprints token streams with a fixed [`Style`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    style: Style,
}

impl Printer {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    pub fn print(&self, file: &SourceFile) -> String {
        self.print_tokens(file.tokens())
    }

    pub fn print_tokens(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        let mut frames: Vec<Frame> = Vec::new();
        let mut line_indent = 0;
        let mut previous: Option<Previous<'_>> = None;
        let mut last_code: Option<&Token> = None;
        let mut before_last_code: Option<&Token> = None;
        let mut closed: Option<Frame> = None;
        // Bracket depths of `if`/`for`/`switch`/`select` headers awaiting
        // their block.
        let mut headers: Vec<usize> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let starts_line = previous.is_none() || token.newlines_before > 0;
            let next = tokens.get(index + 1);
            let mode =
                (token.kind == TokenKind::Operator).then(|| op_mode(token, last_code, next));

            if starts_line {
                if previous.is_some() {
                    out.push('\n');
                    if token.newlines_before > 1 {
                        out.push('\n');
                    }
                }
                line_indent = line_indent_for(tokens, index, &frames, last_code);
                self.style.indent.write(&mut out, line_indent);
            }
            let header_block = token.kind == TokenKind::LBrace
                && headers.last() == Some(&frames.len())
                && !is_composite_literal(last_code, before_last_code);
            if let Some(previous) = previous.filter(|_| !starts_line) {
                let context = Context {
                    mode,
                    next,
                    frames: &frames,
                    closed,
                    header_block,
                };
                if space_between(previous, token, &context) {
                    out.push(' ');
                }
            }
            out.push_str(&token.text);

            if header_block {
                headers.pop();
            } else if token.kind == TokenKind::Keyword
                && matches!(token.text.as_str(), "if" | "for" | "switch" | "select")
            {
                headers.push(frames.len());
            }

            if token.is_open() {
                frames.push(Frame {
                    kind: token.kind,
                    role: role_of(token, last_code, before_last_code, closed, &frames),
                    indent: line_indent,
                });
            } else if token.is_close() {
                closed = frames.pop();
            }
            if !token.is_comment() {
                before_last_code = last_code;
                last_code = Some(token);
            }
            previous = Some(Previous {
                token,
                mode,
                starts_line,
            });
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn op_mode(token: &Token, last_code: Option<&Token>, next: Option<&Token>) -> OpMode {
    let after_operand = last_code.is_some_and(Token::is_operand_end);
    match token.text.as_str() {
        "++" | "--" => OpMode::Postfix,
        "!" | "~" => OpMode::Prefix,
        // `chan<- T` and `<-chan T`
        "<-" if last_code.is_some_and(|t| t.is_keyword("chan")) => OpMode::Postfix,
        "<-" if next.is_some_and(|t| t.is_keyword("chan")) => OpMode::Prefix,
        "+" | "-" | "^" | "<-" if after_operand => OpMode::Infix,
        "+" | "-" | "^" | "<-" => OpMode::Prefix,
        "*" | "&" if after_operand => OpMode::Verbatim,
        "*" | "&" => OpMode::Prefix,
        _ => OpMode::Infix,
    }
}

/// Classify the bracket `open`, seen after `last` and `before`.
fn role_of(
    open: &Token,
    last: Option<&Token>,
    before: Option<&Token>,
    closed: Option<Frame>,
    frames: &[Frame],
) -> Role {
    let Some(last) = last else {
        return Role::Plain;
    };
    let after_func = before.is_some_and(|t| t.is_keyword("func"));
    // `func (r R) Name(`
    let after_receiver = before.is_some_and(|t| t.kind == TokenKind::RParen)
        && closed.is_some_and(|frame| frame.role == Role::Signature);
    let in_interface = frames.last().is_some_and(|frame| frame.role == Role::Interface);

    match open.kind {
        TokenKind::LParen if last.is_keyword("func") => Role::Signature,
        TokenKind::LParen if last.kind == TokenKind::Ident => {
            // Interface methods start their line or follow `{` or `;`.
            let method = in_interface
                && (last.newlines_before > 0
                    || before
                        .is_some_and(|t| matches!(t.kind, TokenKind::LBrace | TokenKind::Semicolon)));
            if after_func || after_receiver || method {
                Role::Signature
            } else {
                Role::Plain
            }
        }
        TokenKind::LParen
            if last.kind == TokenKind::RBracket
                && closed.is_some_and(|frame| frame.role == Role::TypeParams) =>
        {
            Role::Signature
        }
        TokenKind::LBracket if last.kind == TokenKind::Ident && after_func => Role::TypeParams,
        TokenKind::LBrace if last.is_keyword("interface") => Role::Interface,
        _ => Role::Plain,
    }
}

/// Whether printing `token` right after the prefix operator `op` would lex
/// as a different operator: `- -x` against `--x`.
fn merges_with(op: &Token, token: &Token) -> bool {
    let Some(first) = token.text.chars().next() else {
        return false;
    };
    matches!(
        (op.text.as_str(), first),
        ("+", '+') | ("-", '-') | ("&", '&') | ("&", '^')
    )
}

/// Whether the line starting at `index` is a labeled statement. Keys of
/// composite literals share the `Ident :` shape, so the label must end its
/// line or introduce a statement keyword.
fn is_label(tokens: &[Token], index: usize) -> bool {
    let mut code = tokens[index..].iter().filter(|t| !t.is_comment());
    let (Some(name), Some(colon)) = (code.next(), code.next()) else {
        return false;
    };
    if name.kind != TokenKind::Ident || colon.kind != TokenKind::Colon {
        return false;
    }
    match code.next() {
        None => true,
        Some(token) if token.newlines_before > 0 => true,
        Some(token) => {
            token.kind == TokenKind::Keyword
                && matches!(
                    token.text.as_str(),
                    "for" | "switch" | "select" | "if" | "goto" | "break" | "continue"
                        | "return" | "go" | "defer"
                )
        }
    }
}

/// Whether a `{` following `last` (preceded by `before`) starts a composite
/// literal inside a statement header. Only literal types such as `[]int{...}`
/// or `map[K]V{...}` may appear there unparenthesized.
fn is_composite_literal(last: Option<&Token>, before: Option<&Token>) -> bool {
    let Some(last) = last else {
        return false;
    };
    match last.kind {
        TokenKind::Ident => before.is_some_and(|t| t.kind == TokenKind::RBracket),
        TokenKind::Keyword => matches!(last.text.as_str(), "struct" | "interface"),
        _ => false,
    }
}

fn line_indent_for(
    tokens: &[Token],
    index: usize,
    frames: &[Frame],
    last_code: Option<&Token>,
) -> usize {
    let token = &tokens[index];
    let innermost = frames.last();
    if token.is_close() {
        return innermost.map_or(0, |frame| frame.indent);
    }

    let mut indent = innermost.map_or(0, |frame| frame.indent + 1);

    // Comments take the indentation of the code they precede.
    let anchor = tokens[index..].iter().position(|t| !t.is_comment());
    let outdented = anchor.is_some_and(|at| {
        let t = &tokens[index + at];
        t.is_keyword("case") || t.is_keyword("default") || is_label(tokens, index + at)
    });

    if outdented && innermost.is_some_and(|frame| frame.kind == TokenKind::LBrace) {
        indent = indent.saturating_sub(1);
    } else if last_code.is_some_and(Token::continues_line) {
        indent += 1;
    }
    indent
}

fn space_between(previous: Previous<'_>, token: &Token, context: &Context<'_>) -> bool {
    use TokenKind::*;

    let prev = previous.token;
    let frames = context.frames;

    if token.kind == LineComment {
        return true;
    }
    if token.kind == BlockComment || prev.kind == BlockComment {
        return token.space_before;
    }

    match previous.mode {
        Some(OpMode::Prefix) => return merges_with(prev, token),
        Some(OpMode::Verbatim) => return token.space_before,
        _ => {}
    }

    if matches!(token.kind, Comma | Semicolon | RParen | RBracket | Colon) {
        return false;
    }

    match prev.kind {
        LParen | LBracket | Ellipsis => return false,
        // `import . "path"`
        Dot => return matches!(token.kind, String | RawString),
        Comma | Semicolon => return true,
        // `a[i:j]` against `key: value`
        Colon => return !frames.last().is_some_and(|frame| frame.kind == LBracket),
        LBrace => return token.kind != RBrace && token.space_before,
        _ => {}
    }

    if let Some(mode) = context.mode {
        return match mode {
            OpMode::Prefix | OpMode::Infix => true,
            OpMode::Postfix => false,
            OpMode::Verbatim => token.space_before,
        };
    }

    match token.kind {
        Dot => prev.kind == Keyword,
        Ellipsis => token.space_before,
        LParen => match prev.kind {
            // `func f() (int, error)` against `f()(x)`
            RParen => context
                .closed
                .is_some_and(|frame| frame.role == Role::Signature),
            Ident | RBracket | RBrace => false,
            // A method receiver, as opposed to a function literal or type.
            Keyword if prev.text == "func" => previous.starts_line && frames.is_empty(),
            _ => true,
        },
        LBracket => match prev.kind {
            Ident | RParen => token.space_before,
            RBracket | RBrace | String | RawString => false,
            Keyword => prev.text != "map",
            _ => true,
        },
        LBrace => match prev.kind {
            Keyword if matches!(prev.text.as_str(), "struct" | "interface") => {
                !context
                    .next
                    .is_some_and(|next| next.kind == RBrace && next.newlines_before == 0)
            }
            Ident | RBracket | RBrace if context.header_block => true,
            Ident | RBracket | RBrace => token.space_before,
            _ => true,
        },
        RBrace => token.space_before,
        Ident | Keyword if prev.kind == RBracket => false,
        _ => true,
    }
}
