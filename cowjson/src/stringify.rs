//! JSON serialization, compact and pretty.
//!
//! The writer tracks which container nodes are currently being written and
//! fails with [`JsonError::CircularReference`] instead of recursing forever
//! when a container reaches itself.

use crate::error::JsonError;
use crate::node::Node;
use crate::value::Json;
use crate::Result;
use std::collections::HashSet;
use std::sync::Arc;

impl Json {
	/// Serialize to compact JSON text.
	///
	/// Non-finite numbers are rendered as `null`. Object keys appear in the
	/// map's iteration order, which is stable for equal documents but
	/// otherwise unspecified.
	///
	/// # Errors
	///
	/// Returns an error when the value or any nested value has been taken,
	/// or when a container contains itself.
	pub fn stringify(&self) -> Result<String> {
		let mut writer = Writer::new(false);
		writer.write_value(self)?;
		Ok(writer.out)
	}

	/// Serialize to pretty JSON text with two-space indentation.
	///
	/// # Errors
	///
	/// See [`Json::stringify`].
	pub fn stringify_pretty(&self) -> Result<String> {
		let mut writer = Writer::new(true);
		writer.write_value(self)?;
		Ok(writer.out)
	}
}

struct Writer {
	out: String,
	pretty: bool,
	depth: usize,
	visiting: HashSet<*const Node>,
}

impl Writer {
	fn new(pretty: bool) -> Self {
		Writer {
			out: String::new(),
			pretty,
			depth: 0,
			visiting: HashSet::new(),
		}
	}

	fn write_value(&mut self, value: &Json) -> Result<()> {
		let node = value.node()?;
		match node {
			Node::Null => self.out.push_str("null"),
			Node::Boolean(content) => self.out.push_str(if *content { "true" } else { "false" }),
			Node::Number(content) => self.write_number(*content),
			Node::String(content) => self.write_string(content),
			Node::Array(items) => {
				let pointer = value.record().map(Arc::as_ptr).ok_or(JsonError::Taken)?;
				self.enter(pointer)?;
				let result = self.write_array(items);
				self.visiting.remove(&pointer);
				result?;
			}
			Node::Object(map) => {
				let pointer = value.record().map(Arc::as_ptr).ok_or(JsonError::Taken)?;
				self.enter(pointer)?;
				let result = self.write_object(map);
				self.visiting.remove(&pointer);
				result?;
			}
		}
		Ok(())
	}

	fn enter(&mut self, pointer: *const Node) -> Result<()> {
		if self.visiting.insert(pointer) {
			Ok(())
		} else {
			Err(JsonError::CircularReference)
		}
	}

	fn write_number(&mut self, number: f64) {
		if number.is_finite() {
			self.out.push_str(&number.to_string());
		} else {
			self.out.push_str("null");
		}
	}

	fn write_string(&mut self, text: &str) {
		self.out.push('"');
		for character in text.chars() {
			match character {
				'"' => self.out.push_str("\\\""),
				'\\' => self.out.push_str("\\\\"),
				'\n' => self.out.push_str("\\n"),
				'\r' => self.out.push_str("\\r"),
				'\t' => self.out.push_str("\\t"),
				'\u{08}' => self.out.push_str("\\b"),
				'\u{0c}' => self.out.push_str("\\f"),
				// Only C0 controls get the \u form. C1 controls pass through
				// as raw UTF-8; escaping them would collapse to the parser's
				// placeholder on re-parse.
				c if (c as u32) < 0x20 => {
					self.out.push_str(&format!("\\u{:04x}", c as u32));
				}
				c => self.out.push(c),
			}
		}
		self.out.push('"');
	}

	fn write_array(&mut self, items: &[Json]) -> Result<()> {
		if items.is_empty() {
			self.out.push_str("[]");
			return Ok(());
		}
		self.out.push('[');
		self.depth += 1;
		for (index, item) in items.iter().enumerate() {
			if index > 0 {
				self.out.push(',');
			}
			self.newline_indent();
			self.write_value(item)?;
		}
		self.depth -= 1;
		self.newline_indent();
		self.out.push(']');
		Ok(())
	}

	fn write_object(&mut self, map: &crate::map::JsonMap) -> Result<()> {
		if map.is_empty() {
			self.out.push_str("{}");
			return Ok(());
		}
		self.out.push('{');
		self.depth += 1;
		for (index, (key, value)) in map.iter().enumerate() {
			if index > 0 {
				self.out.push(',');
			}
			self.newline_indent();
			self.write_string(key);
			self.out.push(':');
			if self.pretty {
				self.out.push(' ');
			}
			self.write_value(value)?;
		}
		self.depth -= 1;
		self.newline_indent();
		self.out.push('}');
		Ok(())
	}

	fn newline_indent(&mut self) {
		if self.pretty {
			self.out.push('\n');
			for _ in 0..self.depth {
				self.out.push_str("  ");
			}
		}
	}
}
