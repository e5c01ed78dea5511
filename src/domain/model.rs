use crate::utils::error::{PlateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PLATE_ROWS: usize = 8;
pub const PLATE_COLUMNS: usize = 12;
pub const WELL_COUNT: usize = PLATE_ROWS * PLATE_COLUMNS;

const ROW_LETTERS: [char; PLATE_ROWS] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Position on a 96-well plate, e.g. `A1` or `H12`.
///
/// Ordering follows the canonical row-major enumeration A1..A12, B1..H12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WellId {
    index: u8,
}

impl WellId {
    /// Well at a 0-based position in canonical order.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < WELL_COUNT).then(|| Self { index: index as u8 })
    }

    /// `row` is 0-based (A = 0), `column` is 1-based as printed on the plate.
    pub fn new(row: usize, column: usize) -> Option<Self> {
        if row >= PLATE_ROWS || column == 0 || column > PLATE_COLUMNS {
            return None;
        }
        Self::from_index(row * PLATE_COLUMNS + column - 1)
    }

    pub fn index(self) -> usize {
        self.index as usize
    }

    /// 1-based well number as used in the instrument file.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn row_letter(self) -> char {
        ROW_LETTERS[self.index() / PLATE_COLUMNS]
    }

    pub fn column(self) -> usize {
        self.index() % PLATE_COLUMNS + 1
    }

    /// All 96 wells in canonical order.
    pub fn all() -> impl Iterator<Item = WellId> {
        (0..WELL_COUNT).map(|index| WellId { index: index as u8 })
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column())
    }
}

impl FromStr for WellId {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlateError::format(format!("'{}' is not a well between A1 and H12", s));

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let row = ROW_LETTERS
            .iter()
            .position(|&c| c == letter)
            .ok_or_else(invalid)?;

        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let column: usize = digits.parse().map_err(|_| invalid())?;

        WellId::new(row, column).ok_or_else(invalid)
    }
}

impl TryFrom<String> for WellId {
    type Error = PlateError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WellId> for String {
    fn from(well: WellId) -> Self {
        well.to_string()
    }
}

/// Content of one well. Empty strings mean the well is unoccupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellEntry {
    #[serde(rename = "Well")]
    pub well: WellId,
    #[serde(rename = "Sample")]
    pub sample: String,
    #[serde(rename = "Replicate")]
    pub replicate: String,
}

impl WellEntry {
    pub fn new(well: WellId, sample: impl Into<String>, replicate: impl Into<String>) -> Self {
        Self {
            well,
            sample: sample.into(),
            replicate: replicate.into(),
        }
    }

    pub fn empty(well: WellId) -> Self {
        Self::new(well, "", "")
    }

    pub fn is_occupied(&self) -> bool {
        !self.sample.is_empty()
    }
}

/// A whole plate in tabular form: one entry per well, canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularPlate {
    entries: Vec<WellEntry>,
}

impl TabularPlate {
    /// Pairs `(sample, replicate)` values with wells in canonical order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries: Vec<WellEntry> = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (sample, replicate))| {
                WellId::from_index(index)
                    .map(|well| WellEntry::new(well, sample, replicate))
                    .ok_or_else(|| {
                        PlateError::format(format!("plate has more than {} wells", WELL_COUNT))
                    })
            })
            .collect::<Result<_>>()?;

        Self::from_entries(entries)
    }

    /// Accepts entries only if they cover A1..H12 exactly once, in order.
    pub fn from_entries(entries: Vec<WellEntry>) -> Result<Self> {
        if entries.len() != WELL_COUNT {
            return Err(PlateError::format(format!(
                "expected {} wells, found {}",
                WELL_COUNT,
                entries.len()
            )));
        }

        if let Some((entry, expected)) = entries
            .iter()
            .zip(WellId::all())
            .find(|(entry, expected)| entry.well != *expected)
        {
            return Err(PlateError::format(format!(
                "well {} found where {} was expected",
                entry.well, expected
            )));
        }

        Ok(Self { entries })
    }

    /// Reads a tabular plate previously written by [`TabularPlate::write_csv`].
    pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let expected = ["Well", "Sample", "Replicate"];
        if headers.iter().ne(expected.iter().copied()) {
            return Err(PlateError::format(format!(
                "tabular header must be {}, found {}",
                expected.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let entries = rdr
            .deserialize::<WellEntry>()
            .map(|row| row.map_err(PlateError::from))
            .collect::<Result<Vec<_>>>()?;

        Self::from_entries(entries)
    }

    /// Writes `Well,Sample,Replicate` followed by the 96 rows.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for entry in &self.entries {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| PlateError::format(e.to_string()))
    }

    pub fn entries(&self) -> &[WellEntry] {
        &self.entries
    }

    pub fn get(&self, well: WellId) -> &WellEntry {
        &self.entries[well.index()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WellEntry> {
        self.entries.iter()
    }

    pub fn occupied_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_occupied()).count()
    }
}

impl<'a> IntoIterator for &'a TabularPlate {
    type Item = &'a WellEntry;
    type IntoIter = std::slice::Iter<'a, WellEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One line of the instrument file body. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateRow {
    #[serde(rename = "Well")]
    pub well: usize,
    #[serde(rename = "Well Position")]
    pub well_position: String,
    #[serde(rename = "Sample Name")]
    pub sample_name: String,
    #[serde(rename = "Sample Color")]
    pub sample_color: String,
    #[serde(rename = "Biogroup Name")]
    pub biogroup_name: Option<String>,
    #[serde(rename = "Biogroup Color")]
    pub biogroup_color: Option<String>,
    #[serde(rename = "Target Name")]
    pub target_name: String,
    #[serde(rename = "Target Color")]
    pub target_color: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Reporter")]
    pub reporter: String,
    #[serde(rename = "Quencher")]
    pub quencher: String,
    #[serde(rename = "Quantity")]
    pub quantity: Option<String>,
    #[serde(rename = "Comments")]
    pub comments: Option<String>,
}

pub const PLATE_ROW_COLUMNS: [&str; 13] = [
    "Well",
    "Well Position",
    "Sample Name",
    "Sample Color",
    "Biogroup Name",
    "Biogroup Color",
    "Target Name",
    "Target Color",
    "Task",
    "Reporter",
    "Quencher",
    "Quantity",
    "Comments",
];
