//! Shared fixtures for integration tests: a small IPADIC-style dictionary
//! written to a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const METADATA: &str = r#"{
    "name": "mini-ipadic",
    "detail_fields": ["pos1", "pos2", "pos3", "pos4", "conj_type", "conj_form", "base_form", "reading", "pronunciation"]
}"#;

pub const LEX: &str = "\
関西,1,1,3000,名詞,固有名詞,地域,一般,*,*,関西,カンサイ,カンサイ
国際,1,1,3000,名詞,一般,*,*,*,*,国際,コクサイ,コクサイ
空港,1,1,3000,名詞,一般,*,*,*,*,空港,クウコウ,クーコー
関西国際空港,1,1,5000,名詞,固有名詞,組織,*,*,*,関西国際空港,カンサイコクサイクウコウ,カンサイコクサイクーコー
限定,1,1,3000,名詞,サ変接続,*,*,*,*,限定,ゲンテイ,ゲンテイ
トートバッグ,1,1,3000,名詞,一般,*,*,*,*,トートバッグ,トートバッグ,トートバッグ
円,2,2,2000,名詞,接尾,助数詞,*,*,*,円,エン,エン
の,3,3,1000,助詞,連体化,*,*,*,*,の,ノ,ノ
東京,1,1,3000,名詞,固有名詞,地域,一般,*,*,東京,トウキョウ,トーキョー
アンペア,1,1,3000,名詞,一般,*,*,*,*,アンペア,アンペア,アンペア
";

pub const MATRIX: &str = "\
5 5
4 2 -1000
1 3 -200
";

pub const UNK: &str = "\
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

pub const DECOMPOSE: &str = "関西国際空港,関西/国際/空港\n";

/// Write the test dictionary into a fresh temporary directory.
pub fn dictionary_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_dictionary(dir.path());
    dir
}

pub fn write_dictionary(path: &Path) {
    fs::write(path.join("metadata.json"), METADATA).unwrap();
    fs::write(path.join("lex.csv"), LEX).unwrap();
    fs::write(path.join("matrix.def"), MATRIX).unwrap();
    fs::write(path.join("unk.def"), UNK).unwrap();
    fs::write(path.join("decompose.csv"), DECOMPOSE).unwrap();
}

/// Selector for a dictionary directory.
pub fn selector(path: &Path) -> String {
    format!("file://{}", path.display())
}
