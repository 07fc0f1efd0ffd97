use std::error::Error;
use std::fs::File;
use std::io::Read;

use once_cell::sync::OnceCell;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Transaction {
    #[serde(rename = "Time")]
    pub time: Option<i64>,
    #[serde(rename = "Amount")]
    pub amount: Option<f64>,
    #[serde(rename = "Class")]
    pub class: Option<u8>,
    #[serde(rename = "ClientID")]
    pub client_id: u32,
}

impl Transaction {
    pub fn is_fraud(&self) -> bool {
        self.class == Some(1)
    }
}

pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let transactions: Vec<Transaction> = rdr
        .deserialize()
        .collect::<Result<Vec<Transaction>, csv::Error>>()?;

    Ok(transactions)
}

pub fn read_transactions(file_path: &str) -> Result<Vec<Transaction>, Box<dyn Error>> {
    let file = File::open(file_path)?;
    parse_transactions(file)
}

// Process-wide transaction dataset. Loaded once on first access and
// read-only afterwards; there is no write path after initialization.
static DATASET: OnceCell<Vec<Transaction>> = OnceCell::new();

pub fn dataset(file_path: &str) -> Result<&'static [Transaction], Box<dyn Error>> {
    if let Some(rows) = DATASET.get() {
        return Ok(rows);
    }
    let rows = read_transactions(file_path)?;
    log::info!("loaded {} transactions from {}", rows.len(), file_path);
    Ok(DATASET.get_or_init(|| rows))
}

pub fn client_transactions(rows: &[Transaction], client_id: u32) -> Vec<Transaction> {
    rows.iter()
        .filter(|tx| tx.client_id == client_id)
        .cloned()
        .collect()
}
