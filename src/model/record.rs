//! Record type extracted from one listing table row
use std::fmt;

/// Column names in output order
pub const RECORD_FIELDS: [&str; 5] = ["bin", "brand", "bank", "type", "level"];

/// One row of the listing table
///
/// Records carry no identity beyond their field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    /// Bank identification number (first column)
    pub bin: String,

    /// Card brand label
    pub brand: String,

    /// Issuing bank label
    pub bank: String,

    /// Card category (debit, credit, ...), written out as `type`
    pub card_type: String,

    /// Card tier
    pub level: String,
}

impl Record {
    pub fn new(
        bin: impl Into<String>,
        brand: impl Into<String>,
        bank: impl Into<String>,
        card_type: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            bin: bin.into(),
            brand: brand.into(),
            bank: bank.into(),
            card_type: card_type.into(),
            level: level.into(),
        }
    }

    /// Returns the field values in the same order as [`RECORD_FIELDS`]
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.bin,
            &self.brand,
            &self.bank,
            &self.card_type,
            &self.level,
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} / {} / {}",
            self.bin, self.brand, self.bank, self.card_type, self.level
        )
    }
}
