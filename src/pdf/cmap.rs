//! ToUnicode CMap parsing
//!
//! Only the parts of the CMap syntax that map character codes to Unicode are
//! understood: `codespacerange`, `bfchar` and `bfrange`. Everything else in
//! the stream (dictionaries, `usecmap`, CID ranges) is skipped.

use std::collections::HashMap;

use encoding_rs::{UTF_16BE, WINDOWS_1252};

/// Upper bound on codes expanded from a single `bfrange` entry
const MAX_RANGE_SPAN: u32 = 0x1_0000;

/// Character code to Unicode mapping for one font
#[derive(Debug, Clone)]
pub struct ToUnicodeCMap {
    code_len: usize,
    map: HashMap<u32, String>,
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Hex(Vec<u8>),
    ArrayStart,
    ArrayEnd,
    Word(&'a [u8]),
}

impl ToUnicodeCMap {
    /// Parse a decoded CMap stream.
    ///
    /// `default_code_len` is used when the stream declares no codespace range
    /// (1 for simple fonts, 2 for composite fonts).
    pub fn parse(data: &[u8], default_code_len: usize) -> Self {
        let tokens = tokenize(data);
        let mut cmap = ToUnicodeCMap {
            code_len: 0,
            map: HashMap::new(),
        };

        let mut i = 0;
        while i < tokens.len() {
            let keyword = match &tokens[i] {
                Token::Word(word) => *word,
                _ => {
                    i += 1;
                    continue;
                }
            };
            i += 1;

            match keyword {
                b"begincodespacerange" => {
                    while let Some(Token::Hex(lo)) = tokens.get(i) {
                        if cmap.code_len == 0 {
                            cmap.code_len = lo.len();
                        }
                        // low and high bound come in pairs
                        i += 2;
                    }
                }
                b"beginbfchar" => {
                    while let (Some(Token::Hex(src)), Some(Token::Hex(dst))) =
                        (tokens.get(i), tokens.get(i + 1))
                    {
                        cmap.map.insert(code_from_bytes(src), utf16_to_string(dst));
                        i += 2;
                    }
                }
                b"beginbfrange" => {
                    while let (Some(Token::Hex(lo)), Some(Token::Hex(hi))) =
                        (tokens.get(i), tokens.get(i + 1))
                    {
                        let lo = code_from_bytes(lo);
                        let hi = code_from_bytes(hi);
                        i += 2;
                        match tokens.get(i) {
                            Some(Token::Hex(dst)) => {
                                cmap.insert_incrementing(lo, hi, dst);
                                i += 1;
                            }
                            Some(Token::ArrayStart) => {
                                i += 1;
                                let mut code = lo;
                                while let Some(Token::Hex(dst)) = tokens.get(i) {
                                    if code <= hi {
                                        cmap.map.insert(code, utf16_to_string(dst));
                                    }
                                    code = code.saturating_add(1);
                                    i += 1;
                                }
                                if tokens.get(i) == Some(&Token::ArrayEnd) {
                                    i += 1;
                                }
                            }
                            _ => break,
                        }
                    }
                }
                _ => {}
            }
        }

        if cmap.code_len == 0 {
            cmap.code_len = default_code_len.max(1);
        }
        cmap
    }

    /// Number of bytes per character code
    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// Number of mapped codes
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Unicode text for a single code
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.map.get(&code).map(String::as_str)
    }

    /// Decode a string operand into Unicode text.
    ///
    /// Unmapped single-byte codes fall back to Windows-1252; unmapped
    /// multi-byte codes are dropped.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut out = String::new();
        for chunk in bytes.chunks(self.code_len) {
            match self.lookup(code_from_bytes(chunk)) {
                Some(text) => out.push_str(text),
                None if self.code_len == 1 => {
                    let (text, _) = WINDOWS_1252.decode_without_bom_handling(chunk);
                    out.push_str(&text);
                }
                None => {}
            }
        }
        out
    }

    fn insert_incrementing(&mut self, lo: u32, hi: u32, dst: &[u8]) {
        if hi < lo || hi - lo >= MAX_RANGE_SPAN {
            tracing::debug!(lo, hi, "Skipping oversized bfrange entry");
            return;
        }

        let mut units: Vec<u16> = dst
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => u16::from_be_bytes([*a, *b]),
                [a] => u16::from(*a),
                _ => 0,
            })
            .collect();
        if units.is_empty() {
            return;
        }

        for code in lo..=hi {
            self.map.insert(code, String::from_utf16_lossy(&units));
            if let Some(last) = units.last_mut() {
                *last = last.wrapping_add(1);
            }
        }
    }
}

fn code_from_bytes(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0u32, |acc, b| (acc << 8) | u32::from(*b))
}

fn utf16_to_string(bytes: &[u8]) -> String {
    let (text, _) = UTF_16BE.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn tokenize(data: &[u8]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let b = data[i];
        match b {
            b'%' => {
                while i < data.len() && data[i] != b'\n' && data[i] != b'\r' {
                    i += 1;
                }
            }
            b'<' if data.get(i + 1) == Some(&b'<') => i += 2,
            b'>' if data.get(i + 1) == Some(&b'>') => i += 2,
            b'<' => {
                let start = i + 1;
                let end = data[start..]
                    .iter()
                    .position(|&c| c == b'>')
                    .map_or(data.len(), |p| start + p);
                tokens.push(Token::Hex(parse_hex(&data[start..end])));
                i = end + 1;
            }
            b'[' => {
                tokens.push(Token::ArrayStart);
                i += 1;
            }
            b']' => {
                tokens.push(Token::ArrayEnd);
                i += 1;
            }
            b'(' => {
                // literal strings only appear in CMap metadata
                let mut depth = 0usize;
                while i < data.len() {
                    match data[i] {
                        b'\\' => i += 1,
                        b'(' => depth += 1,
                        b')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                i += 1;
            }
            c if c.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < data.len() && !is_delimiter(data[i]) {
                    i += 1;
                }
                if i == start {
                    i += 1;
                } else {
                    tokens.push(Token::Word(&data[start..i]));
                }
            }
        }
    }

    tokens
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'[' | b']' | b'(' | b')' | b'%')
}

fn parse_hex(digits: &[u8]) -> Vec<u8> {
    let nibbles: Vec<u8> = digits
        .iter()
        .filter_map(|c| (*c as char).to_digit(16).map(|d| d as u8))
        .collect();

    nibbles
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => (hi << 4) | lo,
            [hi] => hi << 4,
            _ => 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
3 beginbfchar
<0003> <0020>
<0011> <00E1>
<0012> <011B>
endbfchar
2 beginbfrange
<0024> <0026> <004B>
<0030> <0031> [<0159> <016F>]
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

    #[test]
    fn test_parse_codespace_sets_code_length() {
        let cmap = ToUnicodeCMap::parse(SAMPLE, 1);
        assert_eq!(cmap.code_len(), 2);
    }

    #[test]
    fn test_bfchar_entries() {
        let cmap = ToUnicodeCMap::parse(SAMPLE, 2);
        assert_eq!(cmap.lookup(0x0003), Some(" "));
        assert_eq!(cmap.lookup(0x0011), Some("á"));
        assert_eq!(cmap.lookup(0x0012), Some("ě"));
    }

    #[test]
    fn test_bfrange_incrementing_and_array() {
        let cmap = ToUnicodeCMap::parse(SAMPLE, 2);
        assert_eq!(cmap.lookup(0x0024), Some("K"));
        assert_eq!(cmap.lookup(0x0025), Some("L"));
        assert_eq!(cmap.lookup(0x0026), Some("M"));
        assert_eq!(cmap.lookup(0x0030), Some("ř"));
        assert_eq!(cmap.lookup(0x0031), Some("ů"));
        assert_eq!(cmap.len(), 8);
    }

    #[test]
    fn test_decode_two_byte_codes() {
        let cmap = ToUnicodeCMap::parse(SAMPLE, 2);
        let text = cmap.decode(&[0x00, 0x24, 0x00, 0x03, 0x00, 0x11, 0x00, 0x12, 0x00, 0x99]);
        assert_eq!(text, "K áě");
    }

    #[test]
    fn test_single_byte_fallback() {
        let data = b"beginbfchar <41> <0058> endbfchar";
        let cmap = ToUnicodeCMap::parse(data, 1);
        assert_eq!(cmap.code_len(), 1);
        // 0x8A is S with caron in Windows-1252
        assert_eq!(cmap.decode(b"AB\x8a"), "XB\u{160}");
    }

    #[test]
    fn test_garbage_input_yields_empty_map() {
        let cmap = ToUnicodeCMap::parse(b"<<< ]] (unterminated", 2);
        assert!(cmap.is_empty());
        assert_eq!(cmap.code_len(), 2);
    }

    #[test]
    fn test_parse_hex_odd_length_pads() {
        assert_eq!(parse_hex(b"0A1"), vec![0x0A, 0x10]);
        assert_eq!(parse_hex(b"00 e1"), vec![0x00, 0xE1]);
    }
}
