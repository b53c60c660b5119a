use crate::dictionary::{DictionaryMetadata, SystemDictionary};

pub const SAMPLE_LEX: &str = "\
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

pub const SAMPLE_MATRIX: &str = "\
5 5
4 2 -1000
1 3 -200
";

pub const SAMPLE_UNK: &str = "\
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

pub const SAMPLE_DECOMPOSE: &str = "関西国際空港,関西/国際/空港\n";

pub fn sample_dictionary() -> SystemDictionary {
    let metadata = DictionaryMetadata {
        name: "sample".to_string(),
        detail_fields: Vec::new(),
    };
    let mut dictionary = SystemDictionary::from_readers(
        metadata,
        SAMPLE_LEX.as_bytes(),
        SAMPLE_MATRIX.as_bytes(),
        SAMPLE_UNK.as_bytes(),
    )
    .unwrap();
    dictionary
        .read_decompositions(SAMPLE_DECOMPOSE.as_bytes())
        .unwrap();
    dictionary
}
