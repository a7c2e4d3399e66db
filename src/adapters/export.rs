use crate::domain::model::CardRecord;
use crate::utils::error::{Result, SweepError};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub const VALID: [&'static str; 2] = ["csv", "json"];

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(SweepError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::VALID.join(", ")),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct CardRow<'a> {
    id: &'a str,
    set: &'a str,
    name: &'a str,
    collector_number: &'a str,
    price_eur: &'a str,
    image: &'a str,
}

impl<'a> From<&'a CardRecord> for CardRow<'a> {
    fn from(card: &'a CardRecord) -> Self {
        Self {
            id: &card.id,
            set: &card.set,
            name: &card.name,
            collector_number: card.collector_number.as_deref().unwrap_or(""),
            price_eur: card.price().unwrap_or(""),
            image: card.image_url().unwrap_or(""),
        }
    }
}

pub fn write_csv<W: Write>(cards: &[CardRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for card in cards {
        csv_writer.serialize(CardRow::from(card))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(cards: &[CardRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, cards)?;
    Ok(())
}

pub fn write<W: Write>(format: ExportFormat, cards: &[CardRecord], writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(cards, writer),
        ExportFormat::Json => write_json(cards, writer),
    }
}
