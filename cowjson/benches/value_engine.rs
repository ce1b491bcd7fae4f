use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use cowjson::Json;

fn sample_document(entries: usize) -> String {
	let mut json = Json::object();
	for index in 0..entries {
		let mut item = Json::object();
		item.insert("id", index).unwrap();
		item.insert("name", format!("entry-{index}")).unwrap();
		item.insert("enabled", index % 2 == 0).unwrap();
		item.insert("score", index as f64 * 0.5).unwrap();
		json.insert(&format!("key{index}"), item).unwrap();
	}
	json.stringify().unwrap()
}

fn bench_parse(c: &mut Criterion) {
	let text = sample_document(1000);
	c.bench_function("parse 1000 entries", |b| {
		b.iter(|| Json::parse(&text).unwrap());
	});
}

fn bench_stringify(c: &mut Criterion) {
	let text = sample_document(1000);
	let json = Json::parse(&text).unwrap();
	c.bench_function("stringify 1000 entries", |b| {
		b.iter(|| json.stringify().unwrap());
	});
}

fn bench_clone_and_mutate(c: &mut Criterion) {
	let text = sample_document(1000);
	let json = Json::parse(&text).unwrap();
	c.bench_function("clone + single mutation", |b| {
		b.iter_batched(
			|| json.clone(),
			|mut copy| {
				copy.insert("key0", 0).unwrap();
				copy
			},
			BatchSize::SmallInput,
		);
	});
}

fn bench_scalar_churn(c: &mut Criterion) {
	c.bench_function("build and drop scalars", |b| {
		b.iter(|| {
			let mut array = Json::array();
			for index in 0..1000 {
				array.push(index).unwrap();
			}
			array
		});
	});
}

criterion_group!(
	benches,
	bench_parse,
	bench_stringify,
	bench_clone_and_mutate,
	bench_scalar_churn
);
criterion_main!(benches);
