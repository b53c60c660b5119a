//! Criterion benchmarks for the shikiri tokenizer.
//!
//! Covers plain segmentation in both modes, the full filter pipeline and
//! parallel batch tokenization over a small in-memory dictionary.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use shikiri::dictionary::{DictionaryMetadata, SystemDictionary};
use shikiri::tokenizer::{Tokenizer, TokenizerBuilder};

const LEX: &str = "\
関西,1,1,3000,名詞,固有名詞,地域,一般,*,*,関西,カンサイ,カンサイ
国際,1,1,3000,名詞,一般,*,*,*,*,国際,コクサイ,コクサイ
空港,1,1,3000,名詞,一般,*,*,*,*,空港,クウコウ,クーコー
関西国際空港,1,1,5000,名詞,固有名詞,組織,*,*,*,関西国際空港,カンサイコクサイクウコウ,カンサイコクサイクーコー
限定,1,1,3000,名詞,サ変接続,*,*,*,*,限定,ゲンテイ,ゲンテイ
トートバッグ,1,1,3000,名詞,一般,*,*,*,*,トートバッグ,トートバッグ,トートバッグ
円,2,2,2000,名詞,接尾,助数詞,*,*,*,円,エン,エン
の,3,3,1000,助詞,連体化,*,*,*,*,の,ノ,ノ
東京,1,1,3000,名詞,固有名詞,地域,一般,*,*,東京,トウキョウ,トーキョー
";

const MATRIX: &str = "\
5 5
4 2 -1000
1 3 -200
";

const UNK: &str = "\
DEFAULT,1,1,10000,0,名詞,一般,*,*,*,*,*,*,*
SPACE,1,1,5000,1,記号,空白,*,*,*,*,*,*,*
ALPHA,1,1,4000,1,名詞,固有名詞,組織,*,*,*,*,*,*
NUMERIC,4,4,1500,0,名詞,数,*,*,*,*,*,*,*
KANJINUMERIC,4,4,1500,0,名詞,数,*,*,*,*,*,*,*
KATAKANA,1,1,6000,1,名詞,一般,*,*,*,*,*,*,*
HIRAGANA,1,1,7000,0,名詞,一般,*,*,*,*,*,*,*
KANJI,1,1,8000,0,名詞,一般,*,*,*,*,*,*,*
SYMBOL,1,1,5000,0,記号,一般,*,*,*,*,*,*,*
";

fn dictionary() -> SystemDictionary {
    let metadata = DictionaryMetadata {
        name: "bench".to_string(),
        detail_fields: Vec::new(),
    };
    let mut dictionary =
        SystemDictionary::from_readers(metadata, LEX.as_bytes(), MATRIX.as_bytes(), UNK.as_bytes())
            .unwrap();
    dictionary
        .read_decompositions("関西国際空港,関西/国際/空港\n".as_bytes())
        .unwrap();
    dictionary
}

/// Generate test sentences for benchmarking.
fn generate_sentences(count: usize) -> Vec<String> {
    let words = [
        "関西国際空港",
        "の",
        "限定",
        "トートバッグ",
        "東京",
        "１００円",
        "ＡＢＣ",
        "ひらがな",
        "　",
        "漢字",
    ];

    (0..count)
        .map(|i| {
            let length = 5 + (i % 20);
            (0..length)
                .map(|j| words[(i * 7 + j * 13) % words.len()])
                .collect::<String>()
        })
        .collect()
}

fn tokenizer(mode: &str, with_filters: bool) -> Tokenizer {
    let mut builder = TokenizerBuilder::new();
    builder.set_dictionary_instance(Arc::new(dictionary()));
    builder.set_mode(mode).unwrap();
    if with_filters {
        builder
            .append_character_filter("unicode_normalize", &json!({"kind": "nfkc"}))
            .unwrap()
            .append_token_filter(
                "japanese_compound_word",
                &json!({"tags": ["名詞,数"], "new_tag": "名詞,数"}),
            )
            .unwrap()
            .append_token_filter("japanese_number", &json!({"tags": ["名詞,数"]}))
            .unwrap()
            .append_token_filter("japanese_stop_tags", &json!({"tags": ["助詞"]}))
            .unwrap()
            .append_token_filter("lowercase", &json!({}))
            .unwrap();
    }
    builder.build().unwrap()
}

/// Benchmark single-sentence tokenization.
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let sentences = generate_sentences(100);

    for (name, tokenizer) in [
        ("normal", tokenizer("normal", false)),
        ("decompose", tokenizer("decompose", false)),
        ("normal_with_filters", tokenizer("normal", true)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let tokens = tokenizer.tokenize(black_box(&sentences[0]));
                black_box(tokens)
            })
        });
    }

    group.finish();
}

/// Benchmark sequential versus parallel batches.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let tokenizer = tokenizer("normal", true);
    let sentences = generate_sentences(1000);

    group.throughput(Throughput::Elements(sentences.len() as u64));
    group.bench_function("sequential", |b| {
        b.iter(|| {
            for sentence in &sentences {
                let tokens = tokenizer.tokenize(black_box(sentence));
                let _ = black_box(tokens);
            }
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            let batch = tokenizer.tokenize_batch(black_box(&sentences));
            black_box(batch)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_batch);
criterion_main!(benches);
