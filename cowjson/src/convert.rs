//! Conversions between [`Json`] and native Rust types.
//!
//! `From` implementations build values from Rust scalars, strings, and
//! vectors; the [`FromJson`] trait goes the other way and backs
//! [`Json::get`](crate::Json::get).

use crate::node::Node;
use crate::value::Json;
use crate::Result;

impl From<bool> for Json {
	fn from(input: bool) -> Self {
		Json::from_node(Node::Boolean(input))
	}
}

impl From<&str> for Json {
	fn from(input: &str) -> Self {
		Json::from_node(Node::String(input.to_owned()))
	}
}

impl From<String> for Json {
	fn from(input: String) -> Self {
		Json::from_node(Node::String(input))
	}
}

impl From<&String> for Json {
	fn from(input: &String) -> Self {
		Json::from_node(Node::String(input.clone()))
	}
}

impl From<f64> for Json {
	fn from(input: f64) -> Self {
		Json::from_node(Node::Number(input))
	}
}

/// Deep copy of another value. A taken source yields a taken copy.
impl From<&Json> for Json {
	fn from(input: &Json) -> Self {
		input.clone()
	}
}

impl<T> From<Vec<T>> for Json
where
	Json: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		Json::from_node(Node::Array(input.into_iter().map(Json::from).collect()))
	}
}

/// Implement `From<Number>` for `Json` for types with lossless f64 conversion.
macro_rules! impl_from_number_lossless {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for Json {
				fn from(input: $t) -> Self {
					Json::from_node(Node::Number(f64::from(input)))
				}
			}
		)+
	};
}

/// Implement `From<Number>` for `Json` for types without lossless f64 conversion.
macro_rules! impl_from_number_lossy {
	($($t:ty),+ $(,)?) => {
		$(
			#[allow(clippy::cast_precision_loss)]
			impl From<$t> for Json {
				fn from(input: $t) -> Self {
					Json::from_node(Node::Number(input as f64))
				}
			}
		)+
	};
}

impl_from_number_lossless!(f32, u8, u16, u32, i8, i16, i32);
impl_from_number_lossy!(u64, u128, usize, i64, i128, isize);

/// Types that can be copied out of a [`Json`] value.
pub trait FromJson: Sized {
	/// # Errors
	///
	/// Returns an error when the value has the wrong type or has been taken.
	fn from_json(value: &Json) -> Result<Self>;
}

impl FromJson for bool {
	fn from_json(value: &Json) -> Result<Self> {
		value.as_bool()
	}
}

impl FromJson for f64 {
	fn from_json(value: &Json) -> Result<Self> {
		value.as_f64()
	}
}

impl FromJson for String {
	fn from_json(value: &Json) -> Result<Self> {
		value.as_string()
	}
}

/// Implement `FromJson` for numeric types via `as` casts from f64.
///
/// Integer extraction truncates toward zero, matching an `as` cast.
macro_rules! impl_from_json_number {
	($($t:ty),+ $(,)?) => {
		$(
			#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
			impl FromJson for $t {
				fn from_json(value: &Json) -> Result<Self> {
					Ok(value.as_f64()? as $t)
				}
			}
		)+
	};
}

impl_from_json_number!(f32, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
