//! Text format parser.
//!
//! Parses the format produced by [`crate::printer`] back into a
//! [`Function`]. Values may use any name (`%a`, `%tmp_1`); the printer's
//! numbering is only a convention. Besides the printer's `0xff:16`
//! literals, the parser accepts decimal literals (`-56:32`) and float
//! literals (`255.0:f32`, `nan:f16`, `-inf:f64`). `//` starts a comment.
//!
//! # Two-stage parsing
//!
//! 1. **Raw parse**: winnow combinators parse text into `Raw*` structures.
//! 2. **IR build**: `FunctionBuilder` resolves names and checks arity and
//!    widths, reporting problems as [`ParseError`]s instead of panicking.

use std::collections::HashMap;

use derive_more::{Display, Error};
use winnow::ascii;
use winnow::combinator::{alt, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::bits::{self, BitClass};
use crate::function::{Function, Module};
use crate::opcode::{Opcode, TypeClass};
use crate::refs::{BlockRef, ValueRef};

// ============================================================================
// Error type
// ============================================================================

/// Parse error for the IR text format.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("parse error at offset {offset}: {message}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

// ============================================================================
// Raw (unresolved) structures
// ============================================================================

#[derive(Debug)]
struct RawFunction<'a> {
    name: &'a str,
    params: Vec<RawParam<'a>>,
    blocks: Vec<RawBlock<'a>>,
}

#[derive(Debug)]
struct RawParam<'a> {
    name: &'a str,
    class: Option<TypeClass>,
    bits: u8,
}

#[derive(Debug, Default)]
struct RawBlock<'a> {
    insts: Vec<RawInst<'a>>,
}

#[derive(Debug)]
struct RawInst<'a> {
    /// Remaining input length where the instruction starts.
    at: usize,
    result: Option<(&'a str, u8)>,
    opcode: &'a str,
    exact: bool,
    operands: Vec<RawOperand<'a>>,
}

#[derive(Debug)]
enum RawOperand<'a> {
    Value(&'a str),
    Int(u64, u8),
    Float(f64, u8),
}

// ============================================================================
// Winnow parsers
// ============================================================================

/// Skip whitespace and `//` comments.
fn ws(input: &mut &str) -> ModalResult<()> {
    loop {
        take_while(0.., |c: char| c.is_ascii_whitespace())
            .void()
            .parse_next(input)?;
        if !input.starts_with("//") {
            return Ok(());
        }
        take_while(0.., |c: char| c != '\n')
            .void()
            .parse_next(input)?;
    }
}

/// Parse an identifier: [a-zA-Z_][a-zA-Z0-9_]*
fn ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Parse a value reference: %name or %number
fn value_ref<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(
        '%',
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
    .parse_next(input)
}

/// Parse a block label: ^bbN or ^name
fn block_label<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(
        '^',
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
    .parse_next(input)
}

fn width(input: &mut &str) -> ModalResult<u8> {
    ascii::dec_uint(input)
}

fn hex_literal(input: &mut &str) -> ModalResult<u64> {
    "0x".parse_next(input)?;
    ascii::hex_uint(input)
}

/// Parse an integer literal (unsigned or negative via two's complement).
fn integer_lit(input: &mut &str) -> ModalResult<u64> {
    let negative = opt('-').parse_next(input)?.is_some();
    let value: u64 = ascii::dec_uint(input)?;
    if !negative {
        return Ok(value);
    }
    let i64_min_magnitude = i64::MAX as u64 + 1;
    if value > i64_min_magnitude {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(value.wrapping_neg())
}

/// Parse a float that MUST contain a decimal point, so `42` stays an integer.
fn float_with_dot(input: &mut &str) -> ModalResult<f64> {
    let s = (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        '.',
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt((
            one_of(['e', 'E']),
            opt(one_of(['+', '-'])),
            take_while(1.., |c: char| c.is_ascii_digit()),
        )),
    )
        .take()
        .parse_next(input)?;
    s.parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

/// `%name` or a literal: `0xff:16`, `-56:32`, `1.5:f32`, `nan:f16`.
fn operand<'a>(input: &mut &'a str) -> ModalResult<RawOperand<'a>> {
    alt((value_ref.map(RawOperand::Value), float_operand, int_operand)).parse_next(input)
}

fn float_operand<'a>(input: &mut &'a str) -> ModalResult<RawOperand<'a>> {
    let value = alt((
        "nan".value(f64::NAN),
        "inf".value(f64::INFINITY),
        "-inf".value(f64::NEG_INFINITY),
        float_with_dot,
    ))
    .parse_next(input)?;
    ":f".parse_next(input)?;
    let bits = width(input)?;
    Ok(RawOperand::Float(value, bits))
}

fn int_operand<'a>(input: &mut &'a str) -> ModalResult<RawOperand<'a>> {
    let value = alt((hex_literal, integer_lit)).parse_next(input)?;
    ':'.parse_next(input)?;
    let bits = width(input)?;
    Ok(RawOperand::Int(value, bits))
}

/// `%name: 16` or `%name: f32`
fn param<'a>(input: &mut &'a str) -> ModalResult<RawParam<'a>> {
    let name = value_ref(input)?;
    ws(input)?;
    ':'.parse_next(input)?;
    ws(input)?;
    let class = opt(one_of(['i', 'u', 'f', 'b']).verify_map(TypeClass::from_prefix))
        .parse_next(input)?;
    let bits = width(input)?;
    Ok(RawParam { name, class, bits })
}

/// `%r: 16 = opcode[!] operand, ...` or `opcode operand, ...`
fn raw_inst<'a>(input: &mut &'a str) -> ModalResult<RawInst<'a>> {
    let at = input.len();
    let result = opt((value_ref, ws, ':', ws, width, ws, '=', ws))
        .map(|r| r.map(|(name, _, _, _, bits, _, _, _)| (name, bits)))
        .parse_next(input)?;
    let opcode = ident(input)?;
    let exact = opt('!').parse_next(input)?.is_some();
    let operands: Vec<RawOperand<'a>> =
        separated(1.., preceded(ws, operand), (ws, ',')).parse_next(input)?;
    Ok(RawInst {
        at,
        result,
        opcode,
        exact,
        operands,
    })
}

fn raw_function<'a>(input: &mut &'a str) -> ModalResult<RawFunction<'a>> {
    "fn".parse_next(input)?;
    ws(input)?;
    '@'.parse_next(input)?;
    let name = take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .parse_next(input)?;
    ws(input)?;
    '('.parse_next(input)?;
    ws(input)?;
    let params: Vec<RawParam<'a>> = separated(0.., param, (ws, ',', ws)).parse_next(input)?;
    ws(input)?;
    ')'.parse_next(input)?;
    ws(input)?;
    '{'.parse_next(input)?;

    let mut blocks: Vec<RawBlock<'a>> = Vec::new();
    loop {
        ws(input)?;
        if input.starts_with('}') {
            '}'.parse_next(input)?;
            break;
        }
        if input.starts_with('^') {
            block_label(input)?;
            ws(input)?;
            ':'.parse_next(input)?;
            blocks.push(RawBlock::default());
            continue;
        }
        let inst = raw_inst(input)?;
        if blocks.is_empty() {
            blocks.push(RawBlock::default());
        }
        if let Some(block) = blocks.last_mut() {
            block.insts.push(inst);
        }
    }

    Ok(RawFunction {
        name,
        params,
        blocks,
    })
}

// ============================================================================
// FunctionBuilder (Raw -> Function)
// ============================================================================

struct FunctionBuilder<'a> {
    func: Function,
    /// Maps value name (without %) -> ValueRef
    values: HashMap<&'a str, ValueRef>,
    input_len: usize,
}

impl<'a> FunctionBuilder<'a> {
    fn error(&self, at: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            offset: self.input_len - at,
        }
    }

    fn define(&mut self, at: usize, name: &'a str, v: ValueRef) -> Result<(), ParseError> {
        if self.values.insert(name, v).is_some() {
            return Err(self.error(at, format!("value %{name} is defined twice")));
        }
        Ok(())
    }

    fn build(mut self, raw: RawFunction<'a>, at: usize) -> Result<Function, ParseError> {
        for p in &raw.params {
            check_width(p.bits, p.class).map_err(|msg| self.error(at, msg))?;
            let v = self.func.add_param(p.bits, p.class);
            self.define(at, p.name, v)?;
        }
        if raw.blocks.is_empty() {
            self.func.create_block();
        }
        for block in &raw.blocks {
            let b = self.func.create_block();
            for inst in &block.insts {
                self.build_inst(b, inst)?;
            }
        }
        Ok(self.func)
    }

    fn build_inst(&mut self, block: BlockRef, raw: &RawInst<'a>) -> Result<(), ParseError> {
        let at = raw.at;
        let opcode = Opcode::from_name(raw.opcode)
            .ok_or_else(|| self.error(at, format!("unknown opcode `{}`", raw.opcode)))?;
        let info = opcode.info();
        if raw.operands.len() != info.num_inputs {
            return Err(self.error(
                at,
                format!(
                    "`{opcode}` takes {} operand(s), got {}",
                    info.num_inputs,
                    raw.operands.len()
                ),
            ));
        }

        let bit_size = match (raw.result, info.has_result()) {
            (Some((_, bits)), true) => bits,
            (None, false) => 0,
            (None, true) => {
                return Err(self.error(at, format!("`{opcode}` must name its result")));
            }
            (Some(_), false) => {
                return Err(self.error(at, format!("`{opcode}` has no result")));
            }
        };
        match info.output_size {
            Some(fixed) if fixed != bit_size => {
                return Err(self.error(
                    at,
                    format!("`{opcode}` produces {fixed} bits, not {bit_size}"),
                ));
            }
            None if BitClass::from_bits(bit_size).is_none() => {
                return Err(self.error(at, format!("unsupported width {bit_size}")));
            }
            _ => {}
        }

        let mut operands: Vec<ValueRef> = Vec::with_capacity(raw.operands.len());
        for op in &raw.operands {
            let v = match *op {
                RawOperand::Value(name) => *self
                    .values
                    .get(name)
                    .ok_or_else(|| self.error(at, format!("use of undefined value %{name}")))?,
                RawOperand::Int(value, bits) => {
                    check_width(bits, None).map_err(|msg| self.error(at, msg))?;
                    let masked = value & bits::mask(bits);
                    let fits = masked == value || bits::sign_extend(masked, bits) as u64 == value;
                    if !fits {
                        return Err(self.error(
                            at,
                            format!("literal {value:#x} does not fit in {bits} bits"),
                        ));
                    }
                    self.func.literal(bits, masked)
                }
                RawOperand::Float(value, bits) => {
                    check_width(bits, Some(TypeClass::Float)).map_err(|msg| self.error(at, msg))?;
                    self.func.literal(bits, bits::float_to_bits(value, bits))
                }
            };
            operands.push(v);
        }

        let inst = self.func.append(block, opcode, bit_size, &operands);
        self.func.set_exact(inst, raw.exact);
        if let (Some((name, _)), Some(result)) = (raw.result, self.func.inst_result(inst)) {
            self.define(at, name, result)?;
        }
        Ok(())
    }
}

fn check_width(bits: u8, class: Option<TypeClass>) -> Result<(), String> {
    let ok = match class {
        Some(TypeClass::Float) => bits::is_float_bit_size(bits),
        _ => bits::is_valid_bit_size(bits),
    };
    if ok {
        Ok(())
    } else {
        Err(format!("unsupported width {bits}"))
    }
}

// ============================================================================
// Public API
// ============================================================================

fn lex_error(input: &str, remaining: &str, e: ErrMode<ContextError>) -> ParseError {
    ParseError {
        message: format!("syntax error: {e}"),
        offset: input.len() - remaining.len(),
    }
}

/// Parse a module: zero or more functions.
pub fn parse_module(name: impl Into<String>, input: &str) -> Result<Module, ParseError> {
    let mut module = Module::new(name);
    let mut remaining = input;
    loop {
        ws.parse_next(&mut remaining)
            .map_err(|e| lex_error(input, remaining, e))?;
        if remaining.is_empty() {
            return Ok(module);
        }
        let at = remaining.len();
        let raw = raw_function
            .parse_next(&mut remaining)
            .map_err(|e| lex_error(input, remaining, e))?;
        let builder = FunctionBuilder {
            func: Function::new(raw.name),
            values: HashMap::new(),
            input_len: input.len(),
        };
        module.push(builder.build(raw, at)?);
    }
}

/// Parse exactly one function.
pub fn parse_function(input: &str) -> Result<Function, ParseError> {
    let mut module = parse_module("", input)?;
    if module.functions.len() != 1 {
        return Err(ParseError {
            message: format!("expected one function, found {}", module.functions.len()),
            offset: 0,
        });
    }
    Ok(module.functions.remove(0))
}

/// Parse a function, panicking with the input on failure.
pub fn parse_test_function(input: &str) -> Function {
    parse_function(input).unwrap_or_else(|e| {
        panic!(
            "Failed to parse test IR at offset {}:\n  {}\n\nInput:\n{}",
            e.offset, e.message, input
        );
    })
}

// ============================================================================
// Tests
// ============================================================================
