//! Recursive-descent JSON parser with line and column tracking.
//!
//! The parser walks the input bytes directly. Structural errors report the
//! 1-based line and column where the offending byte was found.

use crate::error::JsonError;
use crate::map::JsonMap;
use crate::node::Node;
use crate::value::Json;
use crate::Result;

impl Json {
	/// Parse a JSON document from text.
	///
	/// The whole input must be consumed: trailing non-whitespace content is
	/// an error. Duplicate object keys are allowed and the last occurrence
	/// wins.
	///
	/// # Errors
	///
	/// Returns [`JsonError::Parse`] describing the first syntax error and
	/// its position.
	pub fn parse(text: &str) -> Result<Json> {
		Parser::new(text.as_bytes()).parse_document().inspect_err(|error| {
			log::debug!("json parse failed: {error}");
		})
	}
}

struct Parser<'a> {
	input: &'a [u8],
	pos: usize,
	line: usize,
	column: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a [u8]) -> Self {
		Parser {
			input,
			pos: 0,
			line: 1,
			column: 1,
		}
	}

	fn parse_document(&mut self) -> Result<Json> {
		self.skip_whitespace();
		if self.peek().is_none() {
			return Err(self.error("unexpected end of input"));
		}
		let value = self.parse_value()?;
		self.skip_whitespace();
		if self.peek().is_some() {
			return Err(self.error("unexpected trailing characters"));
		}
		Ok(value)
	}

	fn error(&self, message: impl Into<String>) -> JsonError {
		JsonError::Parse {
			message: message.into(),
			line: self.line,
			column: self.column,
		}
	}

	fn peek(&self) -> Option<u8> {
		self.input.get(self.pos).copied()
	}

	fn advance(&mut self) -> Option<u8> {
		let byte = self.peek()?;
		self.pos += 1;
		if byte == b'\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(byte)
	}

	fn skip_whitespace(&mut self) {
		while let Some(byte) = self.peek() {
			if matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
				self.advance();
			} else {
				break;
			}
		}
	}

	fn expect(&mut self, expected: u8) -> Result<()> {
		match self.peek() {
			Some(byte) if byte == expected => {
				self.advance();
				Ok(())
			}
			Some(byte) => Err(self.error(format!(
				"expected '{}', found '{}'",
				expected as char, byte as char
			))),
			None => Err(self.error(format!("expected '{}', found end of input", expected as char))),
		}
	}

	fn expect_tag(&mut self, tag: &'static str) -> Result<()> {
		for expected in tag.bytes() {
			if self.peek() != Some(expected) {
				return Err(self.error(format!("invalid literal, expected '{tag}'")));
			}
			self.advance();
		}
		Ok(())
	}

	fn parse_value(&mut self) -> Result<Json> {
		self.skip_whitespace();
		match self.peek() {
			Some(b'n') => {
				self.expect_tag("null")?;
				Ok(Json::null())
			}
			Some(b't') => {
				self.expect_tag("true")?;
				Ok(Json::from(true))
			}
			Some(b'f') => {
				self.expect_tag("false")?;
				Ok(Json::from(false))
			}
			Some(b'"') => {
				let text = self.parse_string()?;
				Ok(Json::from_node(Node::String(text)))
			}
			Some(b'[') => self.parse_array(),
			Some(b'{') => self.parse_object(),
			Some(b'-' | b'0'..=b'9') => self.parse_number(),
			Some(byte) => Err(self.error(format!("unexpected character '{}'", byte as char))),
			None => Err(self.error("unexpected end of input")),
		}
	}

	fn parse_string(&mut self) -> Result<String> {
		self.expect(b'"')?;
		let mut bytes = Vec::new();
		loop {
			let Some(byte) = self.advance() else {
				return Err(self.error("unterminated string"));
			};
			match byte {
				b'"' => break,
				b'\\' => match self.advance() {
					Some(b'"') => bytes.push(b'"'),
					Some(b'\\') => bytes.push(b'\\'),
					Some(b'/') => bytes.push(b'/'),
					Some(b'b') => bytes.push(0x08),
					Some(b'f') => bytes.push(0x0C),
					Some(b'n') => bytes.push(b'\n'),
					Some(b'r') => bytes.push(b'\r'),
					Some(b't') => bytes.push(b'\t'),
					Some(b'u') => bytes.push(self.parse_hex_escape()?),
					Some(byte) => {
						return Err(self.error(format!("invalid escape '\\{}'", byte as char)));
					}
					None => return Err(self.error("unterminated string")),
				},
				0x00..=0x1F => {
					return Err(self.error("control character in string"));
				}
				other => bytes.push(other),
			}
		}
		String::from_utf8(bytes).map_err(|_| self.error("invalid utf-8 in string"))
	}

	/// Decode exactly four hex digits. Code points above 0x7F are replaced
	/// with `'?'`; surrogate pairs are not combined.
	fn parse_hex_escape(&mut self) -> Result<u8> {
		let mut code: u32 = 0;
		for _ in 0..4 {
			let Some(byte) = self.advance() else {
				return Err(self.error("unterminated unicode escape"));
			};
			let digit = match byte {
				b'0'..=b'9' => u32::from(byte - b'0'),
				b'a'..=b'f' => u32::from(byte - b'a') + 10,
				b'A'..=b'F' => u32::from(byte - b'A') + 10,
				_ => return Err(self.error("invalid hex digit in unicode escape")),
			};
			code = code * 16 + digit;
		}
		if code <= 0x7F {
			#[allow(clippy::cast_possible_truncation)]
			Ok(code as u8)
		} else {
			Ok(b'?')
		}
	}

	fn parse_number(&mut self) -> Result<Json> {
		let start = self.pos;
		if self.peek() == Some(b'-') {
			self.advance();
		}
		match self.peek() {
			Some(b'0') => {
				self.advance();
				if matches!(self.peek(), Some(b'0'..=b'9')) {
					return Err(self.error("leading zeros are not allowed"));
				}
			}
			Some(b'1'..=b'9') => {
				while matches!(self.peek(), Some(b'0'..=b'9')) {
					self.advance();
				}
			}
			_ => return Err(self.error("expected a digit")),
		}
		if self.peek() == Some(b'.') {
			self.advance();
			if !matches!(self.peek(), Some(b'0'..=b'9')) {
				return Err(self.error("expected a digit after the decimal point"));
			}
			while matches!(self.peek(), Some(b'0'..=b'9')) {
				self.advance();
			}
		}
		if matches!(self.peek(), Some(b'e' | b'E')) {
			self.advance();
			if matches!(self.peek(), Some(b'+' | b'-')) {
				self.advance();
			}
			if !matches!(self.peek(), Some(b'0'..=b'9')) {
				return Err(self.error("expected a digit in the exponent"));
			}
			while matches!(self.peek(), Some(b'0'..=b'9')) {
				self.advance();
			}
		}
		let text = std::str::from_utf8(&self.input[start..self.pos])
			.map_err(|_| self.error("invalid number"))?;
		let number: f64 = text.parse().map_err(|_| self.error("invalid number"))?;
		Ok(Json::from(number))
	}

	fn parse_array(&mut self) -> Result<Json> {
		self.expect(b'[')?;
		let mut items = Vec::new();
		self.skip_whitespace();
		if self.peek() == Some(b']') {
			self.advance();
			return Ok(Json::from_node(Node::Array(items)));
		}
		loop {
			items.push(self.parse_value()?);
			self.skip_whitespace();
			match self.peek() {
				Some(b',') => {
					self.advance();
				}
				Some(b']') => {
					self.advance();
					break;
				}
				Some(byte) => {
					return Err(self.error(format!(
						"expected ',' or ']', found '{}'",
						byte as char
					)));
				}
				None => return Err(self.error("unterminated array")),
			}
		}
		Ok(Json::from_node(Node::Array(items)))
	}

	fn parse_object(&mut self) -> Result<Json> {
		self.expect(b'{')?;
		let mut map = JsonMap::new();
		self.skip_whitespace();
		if self.peek() == Some(b'}') {
			self.advance();
			return Ok(Json::from_node(Node::Object(map)));
		}
		loop {
			self.skip_whitespace();
			if self.peek() != Some(b'"') {
				return Err(self.error("expected a quoted object key"));
			}
			let key = self.parse_string()?;
			self.skip_whitespace();
			self.expect(b':')?;
			let value = self.parse_value()?;
			map.insert(&key, value);
			self.skip_whitespace();
			match self.peek() {
				Some(b',') => {
					self.advance();
				}
				Some(b'}') => {
					self.advance();
					break;
				}
				Some(byte) => {
					return Err(self.error(format!(
						"expected ',' or '}}', found '{}'",
						byte as char
					)));
				}
				None => return Err(self.error("unterminated object")),
			}
		}
		Ok(Json::from_node(Node::Object(map)))
	}
}
