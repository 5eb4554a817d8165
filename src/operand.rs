use crate::error::AssembleError;

/// Field width a constant is parsed for: 6-bit (ALU immediate, memory
/// offset) or 8-bit (branch/move/IO constants).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W6,
    W8,
}

// Upper bound for 0x/0b literals: 254, one below a full unsigned byte.
const MAX_PREFIXED: u32 = 2 * i8::MAX as u32;
// Signed decimal bounds for the 6-bit context: the whole two's-complement
// negative range together with the whole unsigned positive range.
const MAX_DEC_6BIT: i32 = 0b0011_1111;
const MIN_DEC_6BIT: i32 = -0b0010_0000;

/// Parses a register token of the form `R0`..`R7` into its 3-bit number.
pub fn parse_register(token: &str) -> Result<u8, AssembleError> {
    match token.as_bytes() {
        &[b'R', digit @ b'0'..=b'9'] => {
            let reg = digit - b'0';
            if reg > 7 {
                Err(AssembleError::RegisterOutOfRange(reg))
            } else {
                Ok(reg)
            }
        }
        _ => Err(AssembleError::MalformedOperand(token.to_string())),
    }
}

/// Parses an immediate constant into its byte pattern.
///
/// `0x`/`0b` literals are unsigned and capped at 254; plain decimals are
/// signed, [-32, 63] for [`Width::W6`] and [-128, 127] for [`Width::W8`].
/// Six-bit results keep only their low 6 bits, so negative values survive as
/// their two's-complement pattern.
pub fn parse_constant(token: &str, width: Width) -> Result<u8, AssembleError> {
    let (radix, digits) = if let Some(rest) = token.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = token.strip_prefix("0b") {
        (2, rest)
    } else {
        return parse_decimal(token, width);
    };

    let value = u32::from_str_radix(digits, radix)
        .map_err(|_| AssembleError::MalformedLiteral(token.to_string()))?;
    if value > MAX_PREFIXED {
        return Err(AssembleError::ConstantOutOfRange(token.to_string()));
    }
    Ok(mask(value as u8, width))
}

fn parse_decimal(token: &str, width: Width) -> Result<u8, AssembleError> {
    let value: i32 = token
        .parse()
        .map_err(|_| AssembleError::MalformedLiteral(token.to_string()))?;
    let (min, max) = match width {
        Width::W6 => (MIN_DEC_6BIT, MAX_DEC_6BIT),
        Width::W8 => (i8::MIN as i32, i8::MAX as i32),
    };
    if value < min || value > max {
        return Err(AssembleError::ConstantOutOfRange(token.to_string()));
    }
    Ok(mask(value as u8, width))
}

fn mask(byte: u8, width: Width) -> u8 {
    match width {
        Width::W6 => byte & 0b0011_1111,
        Width::W8 => byte,
    }
}

/// A memory operand: base register plus 6-bit displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemAddress {
    pub reg: u8,
    pub offset: u8,
}

/// Parses a memory operand of the form `N6(Rn)`, with optional horizontal
/// whitespace around the register and both parentheses.
pub fn parse_memory_address(token: &str) -> Result<MemAddress, AssembleError> {
    let malformed = || AssembleError::MalformedMemoryAddress(token.to_string());

    let (offset_txt, rest) = token.split_once('(').ok_or_else(malformed)?;
    let reg_txt = rest.strip_suffix(')').ok_or_else(malformed)?;
    if reg_txt.contains('(') || reg_txt.contains(')') {
        return Err(malformed());
    }
    let offset_txt = offset_txt.trim();
    if offset_txt.is_empty() {
        return Err(malformed());
    }

    // Offsets and registers that break the grammar read as a malformed
    // address; values that merely fall out of range keep their own kind.
    let offset = parse_constant(offset_txt, Width::W6).map_err(|e| match e {
        AssembleError::MalformedLiteral(_) => malformed(),
        other => other,
    })?;
    let reg = parse_register(reg_txt.trim()).map_err(|e| match e {
        AssembleError::MalformedOperand(_) => malformed(),
        other => other,
    })?;

    Ok(MemAddress { reg, offset })
}
