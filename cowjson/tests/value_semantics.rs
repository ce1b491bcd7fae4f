//! End-to-end behavior of the value engine: copy-on-write isolation, move
//! semantics, parsing, serialization, and cross-thread sharing.

use anyhow::Result;
use cowjson::{Json, JsonError, JsonType};

#[test]
fn test_clone_isolation_end_to_end() -> Result<()> {
	let mut document = Json::parse(
		r#"{
			"name": "service",
			"limits": {"memory": 512, "cpu": 2},
			"tags": ["a", "b"]
		}"#,
	)?;
	let snapshot = document.clone();

	document.field_mut("limits")?.insert("memory", 1024)?;
	document.field_mut("tags")?.push("c")?;
	document.insert("name", "renamed")?;

	assert_eq!(document.field("limits")?.field("memory")?.as_f64()?, 1024.0);
	assert_eq!(document.field("tags")?.len()?, 3);
	assert_eq!(document.field("name")?.as_str()?, "renamed");

	assert_eq!(snapshot.field("limits")?.field("memory")?.as_f64()?, 512.0);
	assert_eq!(snapshot.field("tags")?.len()?, 2);
	assert_eq!(snapshot.field("name")?.as_str()?, "service");
	Ok(())
}

#[test]
fn test_deep_sharing_copies_only_touched_path() -> Result<()> {
	let mut left = Json::object();
	let mut shared = Json::array();
	for index in 0..100 {
		shared.push(index)?;
	}
	left.insert("shared", shared.clone())?;
	left.insert("own", 1)?;

	let mut right = left.clone();
	right.insert("own", 2)?;

	// The untouched array is still one node behind both documents.
	assert_eq!(left.field("shared")?, right.field("shared")?);
	assert_eq!(left.field("own")?.as_f64()?, 1.0);
	assert_eq!(right.field("own")?.as_f64()?, 2.0);
	Ok(())
}

#[test]
fn test_take_transfers_content() -> Result<()> {
	let mut source = Json::parse(r#"{"payload": [1, 2, 3]}"#)?;
	let mut moved = source.take();

	assert!(source.is_taken());
	assert_eq!(source.kind(), JsonType::Null);
	assert_eq!(source.field("payload").unwrap_err(), JsonError::Taken);
	assert_eq!(source.stringify().unwrap_err(), JsonError::Taken);

	assert_eq!(moved.field("payload")?.len()?, 3);
	moved.field_mut("payload")?.push(4)?;
	assert_eq!(moved.field("payload")?.len()?, 4);
	Ok(())
}

#[test]
fn test_round_trip_compact_and_pretty() -> Result<()> {
	let text = r#"{"a":[1,2.5,"x",null,true],"b":{"c":{}},"d":[]}"#;
	let parsed = Json::parse(text)?;

	let compact = parsed.stringify()?;
	assert_eq!(Json::parse(&compact)?, parsed);

	let pretty = parsed.stringify_pretty()?;
	assert_eq!(Json::parse(&pretty)?, parsed);

	// Equal documents serialize byte-identically.
	assert_eq!(Json::parse(&compact)?.stringify()?, compact);
	Ok(())
}

#[test]
fn test_parse_errors_carry_positions() {
	let error = Json::parse("{\n  \"a\": 01\n}").unwrap_err();
	match error {
		JsonError::Parse { line, column, ref message } => {
			assert_eq!(line, 2);
			assert!(column > 1);
			assert!(message.contains("leading zeros"), "unexpected: {message}");
		}
		other => panic!("expected a parse error, got {other:?}"),
	}
	assert_eq!(error.line(), Some(2));
}

#[test]
fn test_error_taxonomy() -> Result<()> {
	let mut object = Json::parse(r#"{"n": 1}"#)?;

	assert_eq!(
		object.field("n")?.as_str().unwrap_err(),
		JsonError::Type {
			expected: JsonType::String,
			actual: JsonType::Number,
		}
	);
	assert_eq!(
		object.field("missing").unwrap_err(),
		JsonError::KeyNotFound {
			key: "missing".to_owned()
		}
	);
	assert_eq!(
		object.pop().unwrap_err(),
		JsonError::InvalidOperation {
			op: "pop",
			actual: JsonType::Object,
		}
	);
	assert_eq!(Json::array().pop().unwrap_err(), JsonError::EmptyPop);
	assert_eq!(
		Json::array().at(0).unwrap_err(),
		JsonError::OutOfBounds { index: 0, len: 0 }
	);
	Ok(())
}

#[test]
fn test_build_document_programmatically() -> Result<()> {
	let mut document = Json::object();
	document.insert("title", "report")?;
	document.insert("values", vec![1, 2, 3])?;
	document.field_mut("meta")?.set(Json::object())?;
	document.field_mut("meta")?.insert("version", 2)?;

	assert_eq!(document.field("values")?.at(1)?.as_f64()?, 2.0);
	assert_eq!(document.field("meta")?.field("version")?.as_f64()?, 2.0);
	assert_eq!(document.keys()?.len(), 3);

	let rebuilt = Json::parse(&document.stringify()?)?;
	assert_eq!(rebuilt, document);
	Ok(())
}

#[test]
fn test_handles_share_across_threads() -> Result<()> {
	let document = Json::parse(r#"{"counts": [1, 2, 3, 4]}"#)?;

	let handles: Vec<_> = (0..4)
		.map(|_| {
			let copy = document.clone();
			std::thread::spawn(move || {
				let total: f64 = copy
					.field("counts")
					.unwrap()
					.iter()
					.map(|item| item.as_f64().unwrap())
					.sum();
				total
			})
		})
		.collect();

	for handle in handles {
		assert_eq!(handle.join().unwrap(), 10.0);
	}
	// The original is untouched and still mutable.
	let mut document = document;
	document.field_mut("counts")?.push(5)?;
	assert_eq!(document.field("counts")?.len()?, 5);
	Ok(())
}

#[test]
fn test_mutation_in_one_thread_does_not_leak() -> Result<()> {
	let document = Json::parse(r#"{"value": 1}"#)?;
	let mut copy = document.clone();

	let worker = std::thread::spawn(move || {
		copy.insert("value", 99).unwrap();
		copy.stringify().unwrap()
	});

	let mutated = worker.join().unwrap();
	assert_eq!(mutated, r#"{"value":99}"#);
	assert_eq!(document.field("value")?.as_f64()?, 1.0);
	Ok(())
}

#[test]
fn test_large_document_round_trip() -> Result<()> {
	let mut array = Json::array();
	for index in 0..500 {
		let mut entry = Json::object();
		entry.insert("index", index)?;
		entry.insert("label", format!("item {index}"))?;
		entry.insert("flags", vec![index % 2 == 0, index % 3 == 0])?;
		array.push(entry)?;
	}

	let text = array.stringify()?;
	let parsed = Json::parse(&text)?;
	assert_eq!(parsed, array);
	assert_eq!(parsed.len()?, 500);
	assert_eq!(parsed.at(499)?.field("label")?.as_str()?, "item 499");
	Ok(())
}
