//! PostScript stack machine.
//!
//! The interpreter consumes lexed tokens, keeps the operand, dictionary and
//! graphics-state stacks, and appends SVG fragments to a [`Scene`].
//! Malformed programs never fail: missing operands take neutral defaults
//! and unknown operators leave a comment in the output.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::interp::builder::PathBuilder;
use crate::interp::device::Scene;
use crate::interp::ops::Operator;
use crate::interp::params::InterpreterOptions;
use crate::interp::stream::TokenStream;
use crate::model::objects::{dict_get, new_dict};
use crate::model::{Dict, GraphicsState, PaintMode, StackValue};
use crate::parser::{Token, TokenKind};
use crate::utils::Point;

/// An array or dictionary literal still waiting for its closer.
enum OpenLiteral {
    Array(Vec<StackValue>),
    Dict { dict: Dict, key: Option<String> },
}

impl OpenLiteral {
    fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Whether a dictionary has a key waiting for its value.
    fn awaits_value(&self) -> bool {
        matches!(self, Self::Dict { key: Some(_), .. })
    }

    /// Append an array element, or complete the pending dictionary entry.
    /// A dictionary value with no key is dropped.
    fn push(&mut self, value: StackValue) {
        match self {
            Self::Array(items) => items.push(value),
            Self::Dict { dict, key } => {
                if let Some(key) = key.take() {
                    dict.borrow_mut().insert(key, value);
                }
            }
        }
    }

    fn close(self) -> StackValue {
        match self {
            Self::Array(items) => StackValue::Array(items.into()),
            Self::Dict { dict, .. } => StackValue::Dict(dict),
        }
    }
}

/// PostScript program interpreter producing SVG fragments.
pub struct Interpreter {
    /// Limits applied to this run and inherited by pattern sub-interpreters
    pub(crate) options: InterpreterOptions,
    /// Pattern nesting level; 0 for the top-level program
    pub(crate) depth: usize,
    /// Operand stack
    pub(crate) stack: Vec<StackValue>,
    /// Dictionary stack; index 0 is the global dictionary and is never popped
    pub(crate) dict_stack: Vec<Dict>,
    /// Saved graphics states for gsave/grestore
    pub(crate) gstack: Vec<GraphicsState>,
    /// Current graphics state
    pub(crate) gstate: GraphicsState,
    /// Path under construction
    pub(crate) path: PathBuilder,
    /// Current point in user space
    pub(crate) current_point: Point,
    /// Next suffix for clip, gradient and pattern ids
    pub(crate) next_id: usize,
    /// Output accumulator
    pub(crate) scene: Scene,
    /// Tokens executed so far
    pub(crate) operations: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self::nested(options, 0)
    }

    /// Interpreter for a pattern paint procedure at nesting level `depth`.
    pub(crate) fn nested(options: InterpreterOptions, depth: usize) -> Self {
        Self {
            options,
            depth,
            stack: Vec::new(),
            dict_stack: vec![new_dict()],
            gstack: Vec::new(),
            gstate: GraphicsState::new(),
            path: PathBuilder::new(),
            current_point: (0.0, 0.0),
            next_id: 0,
            scene: Scene::new(),
            operations: 0,
        }
    }

    /// Run `tokens` to completion and return the accumulated scene.
    pub fn interpret(mut self, tokens: &[Token]) -> Scene {
        self.run(tokens);
        self.scene
    }

    /// Execute `tokens`, then flush any unterminated path as a stroke.
    ///
    /// May be called repeatedly; state carries over between calls.
    pub fn run(&mut self, tokens: &[Token]) {
        let mut stream = TokenStream::new(Rc::from(tokens));
        self.execute(&mut stream);
        if !self.path.is_empty() {
            self.flush_path(PaintMode::STROKE_ONLY);
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn operand_stack(&self) -> &[StackValue] {
        &self.stack
    }

    pub fn graphics_state(&self) -> &GraphicsState {
        &self.gstate
    }

    pub fn saved_states(&self) -> usize {
        self.gstack.len()
    }

    pub fn dict_depth(&self) -> usize {
        self.dict_stack.len()
    }

    pub fn path(&self) -> &PathBuilder {
        &self.path
    }

    /// Look up `name` from the innermost dictionary outwards.
    pub fn lookup(&self, name: &str) -> Option<StackValue> {
        self.dict_stack
            .iter()
            .rev()
            .find_map(|dict| dict_get(dict, name))
    }

    fn execute(&mut self, stream: &mut TokenStream) {
        while let Some(token) = stream.next() {
            if let Some(limit) = self.options.max_operations
                && self.operations >= limit
            {
                warn!(limit, "execution limit reached");
                self.scene.add_comment("execution limit reached");
                break;
            }
            self.operations += 1;

            match token.kind {
                TokenKind::Number => {
                    let value = token.text.parse().unwrap_or(0.0);
                    self.stack.push(StackValue::Number(value));
                }
                TokenKind::String | TokenKind::HexString => {
                    self.stack.push(StackValue::Text(token.text));
                }
                TokenKind::Name => self.stack.push(StackValue::Name(token.text)),
                TokenKind::Brace if token.text == "{" => {
                    let body = Self::scan_procedure(stream);
                    self.stack.push(StackValue::Procedure(body.into()));
                }
                TokenKind::Bracket if token.text == "[" => {
                    let array = self.scan_literal(stream, OpenLiteral::Array(Vec::new()));
                    self.stack.push(array);
                }
                TokenKind::DictMarker if token.text == "<<" => {
                    let dict = self.scan_literal(
                        stream,
                        OpenLiteral::Dict {
                            dict: new_dict(),
                            key: None,
                        },
                    );
                    self.stack.push(dict);
                }
                TokenKind::Operator => self.execute_operator(&token.text, stream),
                // Stray closers
                _ => {}
            }
        }
    }

    /// Collect tokens up to the `}` matching an already consumed `{`.
    fn scan_procedure(stream: &mut TokenStream) -> Vec<Token> {
        let mut body = Vec::new();
        let mut depth = 1usize;
        for token in stream.by_ref() {
            if token.is(TokenKind::Brace, "{") {
                depth += 1;
            } else if token.is(TokenKind::Brace, "}") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            body.push(token);
        }
        body
    }

    /// Collect an array or dictionary literal whose opener was just consumed.
    ///
    /// Nesting is tracked on an explicit stack. Inside an array, names and
    /// operands are elements and braces or dict markers are skipped. Inside
    /// a dictionary, a name with no pending key becomes the key and the next
    /// value completes the entry. Literals nested deeper than
    /// `max_literal_depth` are dropped up to their matching closer. A
    /// literal left open at the end of input is closed there.
    fn scan_literal(&mut self, stream: &mut TokenStream, mut root: OpenLiteral) -> StackValue {
        let limit = self.options.max_literal_depth.max(1);
        let mut nested: Vec<OpenLiteral> = Vec::new();
        let mut skipped = 0usize;
        let mut truncated = false;

        while let Some(token) = stream.next() {
            if skipped > 0 {
                match (token.kind, token.text.as_str()) {
                    (TokenKind::Bracket, "[") | (TokenKind::DictMarker, "<<") => skipped += 1,
                    (TokenKind::Bracket, _) | (TokenKind::DictMarker, _) => skipped -= 1,
                    (TokenKind::Brace, "{") => {
                        Self::scan_procedure(stream);
                    }
                    _ => {}
                }
                continue;
            }

            let top = nested.last_mut().unwrap_or(&mut root);
            let in_array = top.is_array();
            let value = match token.kind {
                TokenKind::Number => StackValue::Number(token.text.parse().unwrap_or(0.0)),
                TokenKind::String | TokenKind::HexString => StackValue::Text(token.text),
                TokenKind::Name => {
                    if let OpenLiteral::Dict { key, .. } = top
                        && key.is_none()
                    {
                        *key = Some(token.text);
                        continue;
                    }
                    StackValue::Name(token.text)
                }
                // Bare words such as `true` as values
                TokenKind::Operator if top.awaits_value() => StackValue::Name(token.text),
                TokenKind::Brace if token.text == "{" && !in_array => {
                    StackValue::Procedure(Self::scan_procedure(stream).into())
                }
                TokenKind::Bracket | TokenKind::DictMarker
                    if token.text == "[" || (token.text == "<<" && !in_array) =>
                {
                    if nested.len() + 1 >= limit {
                        skipped = 1;
                        truncated = true;
                    } else if token.text == "[" {
                        nested.push(OpenLiteral::Array(Vec::new()));
                    } else {
                        nested.push(OpenLiteral::Dict {
                            dict: new_dict(),
                            key: None,
                        });
                    }
                    continue;
                }
                // `]` only closes arrays and `>>` only dictionaries
                TokenKind::Bracket | TokenKind::DictMarker
                    if (token.text == "]") == in_array && token.text != "<<" =>
                {
                    match nested.pop() {
                        Some(done) => done.close(),
                        None => break,
                    }
                }
                _ => continue,
            };
            nested.last_mut().unwrap_or(&mut root).push(value);
        }

        if truncated {
            warn!(limit, "literal nesting limit reached");
            self.scene.add_comment("literal nesting limit reached");
        }
        while let Some(done) = nested.pop() {
            let value = done.close();
            nested.last_mut().unwrap_or(&mut root).push(value);
        }
        root.close()
    }

    fn execute_operator(&mut self, name: &str, stream: &mut TokenStream) {
        if let Some(value) = self.lookup(name) {
            match value {
                StackValue::Procedure(body) => {
                    if stream.push_expansion(body, self.options.max_expansion_depth) {
                        debug!(name, depth = stream.expansion_depth(), "expanding procedure");
                    } else {
                        warn!(name, "procedure expansion limit reached");
                        self.scene
                            .add_comment(&format!("procedure expansion limit reached: {name}"));
                    }
                }
                other => self.stack.push(other),
            }
            return;
        }

        match Operator::from_name(name) {
            Some(op) => self.dispatch_operator(op, stream),
            None => {
                debug!(operator = name, "unhandled operator");
                self.scene.add_comment(&format!("Unhandled operator: {name}"));
            }
        }
    }

    fn dispatch_operator(&mut self, op: Operator, stream: &TokenStream) {
        match op {
            // Arithmetic and stack
            Operator::Neg => self.do_neg(),
            Operator::Add => {
                let b = self.pop_number_or(0.0);
                let a = self.pop_number_or(0.0);
                self.do_add(a, b);
            }
            Operator::Sub => {
                let b = self.pop_number_or(0.0);
                let a = self.pop_number_or(0.0);
                self.do_sub(a, b);
            }
            Operator::Mul => {
                let b = self.pop_number_or(1.0);
                let a = self.pop_number_or(1.0);
                self.do_mul(a, b);
            }
            Operator::Div => {
                let b = self.pop_number_or(1.0);
                let a = self.pop_number_or(0.0);
                self.do_div(a, b);
            }
            Operator::Exch => self.do_exch(),
            Operator::Dup => self.do_dup(),

            // Dictionaries
            Operator::Dict => {
                self.pop_value();
                self.do_dict();
            }
            Operator::Begin => {
                let dict = self.pop_value();
                self.do_begin(dict);
            }
            Operator::End => self.do_end(),
            Operator::Def => {
                let value = self.pop_value();
                let key = self.pop_value();
                if let (Some(key), Some(value)) = (key, value) {
                    self.do_def(&key, value);
                }
            }

            // Graphics state
            Operator::GSave => self.do_gsave(),
            Operator::GRestore => self.do_grestore(),
            Operator::Translate => {
                let ty = self.pop_number_or(0.0);
                let tx = self.pop_number_or(0.0);
                self.do_translate(tx, ty);
            }
            Operator::Scale => {
                let sy = self.pop_number_or(1.0);
                let sx = self.pop_number_or(1.0);
                self.do_scale(sx, sy);
            }
            Operator::Rotate => {
                let angle = self.pop_number_or(0.0);
                self.do_rotate(angle);
            }
            Operator::SetLineWidth => {
                let width = self.pop_number_or(1.0);
                self.do_setlinewidth(width);
            }
            Operator::SetLineCap => {
                if let Some(cap) = self.pop_value() {
                    self.do_setlinecap(&cap);
                }
            }
            Operator::SetLineJoin => {
                if let Some(join) = self.pop_value() {
                    self.do_setlinejoin(&join);
                }
            }
            Operator::SetDash => {
                let offset = self.pop_number_or(0.0);
                let pattern = self.pop_value();
                self.do_setdash(pattern.as_ref(), offset);
            }

            // Color
            Operator::SetRgbColor => {
                let b = self.pop_number_or(0.0);
                let g = self.pop_number_or(0.0);
                let r = self.pop_number_or(0.0);
                self.do_setrgbcolor(r, g, b);
            }
            Operator::SetGray => {
                let gray = self.pop_number_or(0.0);
                self.do_setgray(gray);
            }
            Operator::SetCmykColor => {
                let k = self.pop_number_or(0.0);
                let y = self.pop_number_or(0.0);
                let m = self.pop_number_or(0.0);
                let c = self.pop_number_or(0.0);
                self.do_setcmykcolor(c, m, y, k);
            }
            Operator::SetPattern => {
                let pattern = self.pop_value();
                self.do_setpattern(pattern);
            }

            // Path construction
            Operator::NewPath => self.do_newpath(),
            Operator::MoveTo => {
                let (x, y) = self.pop_point();
                self.do_moveto(x, y);
            }
            Operator::RMoveTo => {
                let (dx, dy) = self.pop_point();
                self.do_rmoveto(dx, dy);
            }
            Operator::LineTo => {
                let (x, y) = self.pop_point();
                self.do_lineto(x, y, stream);
            }
            Operator::RLineTo => {
                let (dx, dy) = self.pop_point();
                self.do_rlineto(dx, dy);
            }
            Operator::CurveTo => {
                let (x3, y3) = self.pop_point();
                let (x2, y2) = self.pop_point();
                let (x1, y1) = self.pop_point();
                self.do_curveto(x1, y1, x2, y2, x3, y3);
            }
            Operator::RCurveTo => {
                let (dx3, dy3) = self.pop_point();
                let (dx2, dy2) = self.pop_point();
                let (dx1, dy1) = self.pop_point();
                self.do_rcurveto(dx1, dy1, dx2, dy2, dx3, dy3);
            }
            Operator::ClosePath => self.do_closepath(),
            Operator::Arc => {
                let ang2 = self.pop_number_or(0.0);
                let ang1 = self.pop_number_or(0.0);
                let r = self.pop_number_or(0.0);
                let (x, y) = self.pop_point();
                self.do_arc(x, y, r, ang1, ang2);
            }

            // Painting
            Operator::Stroke => self.do_stroke(),
            Operator::Fill => self.do_fill(),
            Operator::Clip => self.do_clip(),
            Operator::ShFill => {
                if let Some(StackValue::Dict(shading)) = self.pop_value() {
                    self.do_shfill(&shading);
                }
            }
            Operator::MakePattern => {
                if let Some(StackValue::Dict(pattern)) = self.pop_value() {
                    self.do_makepattern(pattern);
                }
            }
            Operator::Image => self.do_image(),

            // Text
            Operator::FindFont => {
                let name = self.pop_value();
                self.do_findfont(name.as_ref());
            }
            Operator::ScaleFont => {
                let size = self.pop_number_or(0.0);
                let font = self.pop_value();
                self.do_scalefont(font, size);
            }
            Operator::SetFont => {
                if let Some(font) = self.pop_value() {
                    self.do_setfont(&font);
                }
            }
            Operator::Show => {
                let text = self
                    .pop_value()
                    .map(|value| value.to_display_string())
                    .unwrap_or_default();
                self.do_show(&text);
            }

            Operator::ShowPage | Operator::SetColorSpace | Operator::Matrix => {}
        }
    }

    /// Pop a number, coercing numeric text; `default` when the stack is
    /// empty or the value has no numeric reading.
    pub(crate) fn pop_number_or(&mut self, default: f64) -> f64 {
        self.stack
            .pop()
            .and_then(|value| value.as_number())
            .unwrap_or(default)
    }

    pub(crate) fn pop_value(&mut self) -> Option<StackValue> {
        self.stack.pop()
    }

    /// Pop y then x, both defaulting to 0.
    pub(crate) fn pop_point(&mut self) -> Point {
        let y = self.pop_number_or(0.0);
        let x = self.pop_number_or(0.0);
        (x, y)
    }

    pub(crate) fn push_number(&mut self, value: f64) {
        self.stack.push(StackValue::Number(value));
    }

    /// Fresh identifier such as `clip3` or `grad4`.
    pub(crate) fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Re-derive the path coordinate policy after a transform or clip change.
    pub(crate) fn update_path_transform(&mut self) {
        if self.gstate.needs_group() {
            self.path.set_transform_mode(true, None);
        } else {
            self.path.set_transform_mode(false, Some(self.gstate.ctm));
        }
    }

    /// Paint the current path, if any, and start a new one.
    pub(crate) fn flush_path(&mut self, mode: PaintMode) {
        if self.path.is_empty() {
            return;
        }
        let d = self.path.to_path();
        self.scene.paint_path(&d, &self.gstate, mode, None);
        self.path = self.path.reset();
    }

    /// Whether a two-point path should be painted before the remaining
    /// tokens run.
    ///
    /// Looks at the next operator only: anything that would extend the
    /// path or change its style keeps it open.
    pub(crate) fn ends_simple_line(stream: &TokenStream) -> bool {
        let next_op = stream
            .lookahead()
            .find(|token| token.kind == TokenKind::Operator);
        match next_op.and_then(|token| Operator::from_name(&token.text)) {
            Some(op) => !(op.is_state_modifier() || op.is_path_continuator()),
            None => true,
        }
    }
}
