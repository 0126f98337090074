use std::collections::BTreeMap;

use kotoba_core::{LoadError, Result, SortedLines};
use serde::Serialize;

/// Code points below this are never looked up as kanji.
pub const KANJI_MIN: u32 = 0x3000;

/// Separator between the fields of a kanji record.
const FIELD_SEPARATOR: char = '|';

/// `、 ` between readings when shown to the user.
const READING_SEPARATOR: &str = "、 ";

/// One of the 214 Kangxi radicals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Radical {
    /// 1-based Kangxi number
    pub number: usize,
    pub symbol: String,
    /// Form the radical takes inside kanji
    pub form: String,
    pub english: String,
    /// Japanese name; empty when the table has none
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct RadicalTable {
    radicals: Vec<Radical>,
}

impl RadicalTable {
    /// One radical per line, in Kangxi order:
    /// `symbol<TAB>form<TAB>english[<TAB>japanese name[<TAB>…]]`.
    /// Columns past the name are ignored.
    pub fn from_lines<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Result<Self> {
        let radicals = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let fields: Vec<&str> = line.as_ref().trim_end_matches('\r').split('\t').collect();
                match fields[..] {
                    [symbol, form, english] => Ok((symbol, form, english, "")),
                    [symbol, form, english, name, ..] => Ok((symbol, form, english, name)),
                    _ => Err(LoadError::invalid_format(format!(
                        "radical {}: expected at least 3 fields, found {}",
                        i + 1,
                        fields.len()
                    ))),
                }
                .map(|(symbol, form, english, name)| Radical {
                    number: i + 1,
                    symbol: symbol.to_string(),
                    form: form.to_string(),
                    english: english.to_string(),
                    name: name.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { radicals })
    }

    /// Radical by its 1-based number.
    pub fn get(&self, number: usize) -> Option<&Radical> {
        number.checked_sub(1).and_then(|i| self.radicals.get(i))
    }

    pub fn len(&self) -> usize {
        self.radicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radicals.is_empty()
    }
}

/// A parsed kanji dictionary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanjiEntry {
    pub kanji: String,
    /// Reference codes such as `S` (strokes), `G` (grade) or `U` (code point)
    pub misc: BTreeMap<String, String>,
    pub onkun: Vec<String>,
    pub nanori: Vec<String>,
    /// Radical name given by the record itself, empty when it has none
    pub bushumei: String,
    pub eigo: String,
    pub radical: Option<Radical>,
}

impl KanjiEntry {
    pub fn onkun_display(&self) -> String {
        self.onkun.join(READING_SEPARATOR)
    }

    pub fn nanori_display(&self) -> String {
        self.nanori.join(READING_SEPARATOR)
    }

    pub fn misc_value(&self, code: &str) -> Option<&str> {
        self.misc.get(code).map(String::as_str)
    }

    pub fn strokes(&self) -> Option<u32> {
        self.misc_value("S")?.split(' ').next()?.parse().ok()
    }

    /// The record's own radical name, falling back to the radical table.
    pub fn radical_name(&self) -> Option<&str> {
        if !self.bushumei.is_empty() {
            return Some(self.bushumei.as_str());
        }
        self.radical
            .as_ref()
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Parse a `kanji|misc|onkun|nanori|bushumei|eigo` record.
///
/// Anything else is treated as absent.
pub fn parse_record(line: &str) -> Option<KanjiEntry> {
    let fields: Vec<&str> = line.trim_end_matches('\r').split(FIELD_SEPARATOR).collect();
    let [kanji, misc, onkun, nanori, bushumei, eigo] = fields[..] else {
        return None;
    };
    let code_point = kanji.chars().next()? as u32;

    let mut codes: BTreeMap<String, String> = BTreeMap::new();
    for token in misc.split_whitespace() {
        let split = token
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(token.len());
        let (code, value) = token.split_at(split);
        if code.is_empty() {
            continue;
        }
        codes
            .entry(code.to_string())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    codes.insert("U".to_string(), format!("{code_point:04X}"));

    let readings = |field: &str| -> Vec<String> {
        field.split_whitespace().map(str::to_string).collect()
    };

    Some(KanjiEntry {
        kanji: kanji.to_string(),
        misc: codes,
        onkun: readings(onkun),
        nanori: readings(nanori),
        bushumei: bushumei.to_string(),
        eigo: eigo.to_string(),
        radical: None,
    })
}

/// Kanji dictionary keyed by the character at the start of each record.
#[derive(Debug, Clone, Default)]
pub struct KanjiDictionary {
    records: SortedLines,
}

impl KanjiDictionary {
    pub fn new(text: String) -> Self {
        Self {
            records: SortedLines::new(text),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw record for `kanji`.
    pub fn record(&self, kanji: &str) -> Option<&str> {
        self.records.find(&format!("{kanji}{FIELD_SEPARATOR}"))
    }

    /// Look up `input` and resolve its radical through `radicals` when given.
    pub fn search(&self, input: &str, radicals: Option<&RadicalTable>) -> Option<KanjiEntry> {
        let first = input.chars().next()?;
        if (first as u32) < KANJI_MIN {
            return None;
        }

        let Some(mut entry) = self.record(input).and_then(parse_record) else {
            tracing::debug!("No kanji record for {input}");
            return None;
        };

        entry.radical = entry
            .misc_value("B")
            .and_then(|b| b.split(' ').next())
            .and_then(|b| b.parse::<usize>().ok())
            .and_then(|number| radicals?.get(number))
            .cloned();
        Some(entry)
    }
}
