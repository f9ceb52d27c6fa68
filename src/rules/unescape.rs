//! C-style escape decoding for quoted rule patterns

/// Decode a double-quoted literal, quotes included.
///
/// Supports `\a \b \f \n \r \t \v \\ \' \"`, three-digit octal `\NNN`, `\xHH`,
/// `\uHHHH` and `\UHHHHHHHH`. Octal and `\x` escapes produce raw bytes, so the
/// decoded bytes must form valid UTF-8.
pub fn unquote(quoted: &str) -> Result<String, String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| format!("not a quoted string: {}", quoted))?;

    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Err("unescaped quote inside string".to_string()),
            '\\' => {
                let escape = chars
                    .next()
                    .ok_or_else(|| "string ends inside an escape sequence".to_string())?;
                match escape {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0c),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0b),
                    '\\' => out.push(b'\\'),
                    '\'' => out.push(b'\''),
                    '"' => out.push(b'"'),
                    '0'..='7' => {
                        let digits: String = std::iter::once(escape)
                            .chain(chars.by_ref().take(2))
                            .collect();
                        let value = parse_digits(&digits, 8, 3)?;
                        let byte = u8::try_from(value)
                            .map_err(|_| format!("octal escape out of range: \\{}", digits))?;
                        out.push(byte);
                    }
                    'x' => {
                        let digits: String = chars.by_ref().take(2).collect();
                        let value = parse_digits(&digits, 16, 2)?;
                        // Two hex digits always fit in a byte.
                        out.push(value as u8);
                    }
                    'u' | 'U' => {
                        let width = if escape == 'u' { 4 } else { 8 };
                        let digits: String = chars.by_ref().take(width).collect();
                        let value = parse_digits(&digits, 16, width)?;
                        let decoded = char::from_u32(value)
                            .ok_or_else(|| format!("invalid code point: \\{}{}", escape, digits))?;
                        push_char(&mut out, decoded);
                    }
                    other => return Err(format!("unknown escape sequence: \\{}", other)),
                }
            }
            _ => push_char(&mut out, c),
        }
    }

    String::from_utf8(out).map_err(|_| "escaped bytes are not valid UTF-8".to_string())
}

fn parse_digits(digits: &str, radix: u32, width: usize) -> Result<u32, String> {
    if digits.chars().count() != width || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("malformed escape digits: {}", digits));
    }
    u32::from_str_radix(digits, radix).map_err(|e| e.to_string())
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
